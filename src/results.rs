use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// A ranked keyword and every character offset at which it occurs in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    pub offsets: Vec<usize>,
}

impl Keyword {
    /// Create a keyword, locating its occurrences in `source`
    pub fn locate(keyword: impl Into<String>, source: &str) -> Self {
        let keyword = keyword.into();
        let offsets = crate::utils::find_offsets(source, &keyword);
        Self { keyword, offsets }
    }
}

/// Which branch of the fallback extraction produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPath {
    /// Nothing but whitespace in the input
    Empty,
    /// Too few tokens to analyse; the whole text is the keyword
    ShortText,
    /// Few candidates, all returned shortest first
    Listing,
    /// Candidates selected by graph ranking
    Graph,
    /// No candidates; plain tokens in document order
    TokenDump,
}

/// Fully materialized output of one ranking call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keywords: Vec<Keyword>,
    pub path: RankingPath,
}

impl KeywordResult {
    pub fn new(keywords: Vec<Keyword>, path: RankingPath) -> Self {
        Self { keywords, path }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), RankingPath::Empty)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Keyword strings in rank order
    pub fn texts(&self) -> Vec<&str> {
        self.keywords.iter().map(|k| k.keyword.as_str()).collect()
    }
}

/// Where the keywords of a query profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStatus {
    /// Entity recognition succeeded and yielded keywords
    Remote,
    /// Entity recognition was not attempted (e.g. unsupported language)
    FallbackSkipped,
    /// Entity recognition succeeded but found nothing
    FallbackEmpty,
    /// Entity recognition failed or timed out
    RemoteFailed,
}

impl ExtractionStatus {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, ExtractionStatus::Remote)
    }
}

/// One keyword of a query profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextKeyword {
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Url>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,

    #[serde(default)]
    pub is_main_topic: bool,
}

impl ContextKeyword {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            uri: None,
            entity_type: None,
            is_main_topic: false,
        }
    }
}

/// The query handed to the search layer for one paragraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryProfile {
    pub context_keywords: Vec<ContextKeyword>,

    /// Offsets of each keyword in the paragraph text, for highlighting
    pub offsets: BTreeMap<String, Vec<usize>>,

    pub status: ExtractionStatus,
}

impl QueryProfile {
    /// Build a profile from locally ranked keywords
    pub fn from_keywords(result: KeywordResult, status: ExtractionStatus) -> Self {
        let mut context_keywords = Vec::with_capacity(result.len());
        let mut offsets = BTreeMap::new();
        for keyword in result.keywords {
            context_keywords.push(ContextKeyword::plain(keyword.keyword.clone()));
            offsets.insert(keyword.keyword, keyword.offsets);
        }
        Self {
            context_keywords,
            offsets,
            status,
        }
    }

    pub fn keyword_texts(&self) -> Vec<&str> {
        self.context_keywords.iter().map(|k| k.text.as_str()).collect()
    }

    pub fn main_topic(&self) -> Option<&ContextKeyword> {
        self.context_keywords.iter().find(|k| k.is_main_topic)
    }
}
