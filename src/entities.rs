// Remote entity recognition with local keyword fallback

use crate::error::RecognitionError;
use crate::keywords::KeywordRanker;
use crate::results::{ContextKeyword, ExtractionStatus, QueryProfile};
use crate::utils::find_offsets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Language the recognition service understands
pub const SUPPORTED_LANGUAGE: &str = "en";

/// One paragraph sent for recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphRequest {
    pub id: String,
    pub headline: String,
    pub content: String,
}

/// Request body of the recognition service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRequest {
    pub paragraphs: Vec<ParagraphRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl EntityRequest {
    pub fn single(id: impl Into<String>, headline: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![ParagraphRequest {
                id: id.into(),
                headline: headline.into(),
                content: content.into(),
            }],
            language: Some(SUPPORTED_LANGUAGE.to_string()),
        }
    }
}

/// An entity as reported by the service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub entity_uri: Option<String>,

    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,

    /// Positions of the entity in the paragraph
    #[serde(default)]
    pub offset: Vec<usize>,

    #[serde(default)]
    pub confidence: Option<f64>,
}

impl Entity {
    /// The entity URI, if present and well-formed
    pub fn uri(&self) -> Option<Url> {
        let raw = self.entity_uri.as_deref()?;
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                ::log::warn!("Ignoring malformed entity URI {:?}: {}", raw, e);
                None
            }
        }
    }
}

/// An entity together with its occurrence count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticEntry {
    pub key: Entity,
    #[serde(default)]
    pub value: u32,
}

/// Recognition result for one paragraph
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotatedParagraph {
    #[serde(default)]
    pub topic: Option<Entity>,
    #[serde(default)]
    pub statistic: Vec<StatisticEntry>,
}

/// Successful response of the recognition service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityResponse {
    #[serde(default)]
    pub paragraphs: Vec<AnnotatedParagraph>,
}

impl EntityResponse {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An entity in the grouped view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedEntity {
    pub text: String,
    /// Occurrences in the paragraph
    pub weight: u32,
    pub confidence: Option<f64>,
    pub uri: Option<Url>,
}

/// Entities of a paragraph grouped by type
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Entities {
    pub persons: Vec<NamedEntity>,
    pub organizations: Vec<NamedEntity>,
    pub locations: Vec<NamedEntity>,
    pub misc: Vec<NamedEntity>,
}

/// Group statistic entries into persons, organizations, locations and the rest
pub fn entities_from_statistic(statistic: &[StatisticEntry]) -> Entities {
    let mut entities = Entities::default();
    for entry in statistic {
        let entity = NamedEntity {
            text: entry.key.text.clone(),
            weight: entry.value,
            confidence: entry.key.confidence,
            uri: entry.key.uri(),
        };
        match entry.key.entity_type.as_deref() {
            Some("Person") => entities.persons.push(entity),
            Some("Organization") => entities.organizations.push(entity),
            Some("Location") => entities.locations.push(entity),
            _ => entities.misc.push(entity),
        }
    }
    entities
}

/// What happened to the remote recognition attempt
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome {
    /// Not attempted, e.g. because the text is not in a supported language
    Skipped,
    Failed(RecognitionError),
    Response(EntityResponse),
}

impl From<Result<EntityResponse, RecognitionError>> for RemoteOutcome {
    fn from(result: Result<EntityResponse, RecognitionError>) -> Self {
        match result {
            Ok(response) => RemoteOutcome::Response(response),
            Err(e) => RemoteOutcome::Failed(e),
        }
    }
}

/// Transport to a remote entity-recognition service
pub trait EntityRecognizer {
    fn recognize(
        &self,
        request: &EntityRequest,
    ) -> impl Future<Output = Result<EntityResponse, RecognitionError>> + Send;
}

/// Builds query profiles, preferring remote entities over local keywords
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    ranker: KeywordRanker,
    timeout: Duration,
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new(KeywordRanker::default())
    }
}

impl QueryBuilder {
    pub fn new(ranker: KeywordRanker) -> Self {
        Self {
            ranker,
            timeout: Duration::from_secs(5),
        }
    }

    /// Give up on the recognizer after this long
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the profile for `content` from an already known remote outcome
    pub fn build(&self, content: &str, remote: RemoteOutcome) -> QueryProfile {
        let status = match remote {
            RemoteOutcome::Response(response) => match remote_profile(content, &response) {
                Some(profile) => return profile,
                None => ExtractionStatus::FallbackEmpty,
            },
            RemoteOutcome::Failed(e) => {
                ::log::warn!("Entity recognition failed ({}), using local keywords", e);
                ExtractionStatus::RemoteFailed
            }
            RemoteOutcome::Skipped => ExtractionStatus::FallbackSkipped,
        };
        ::log::debug!("Falling back to local keyword ranking ({:?})", status);
        QueryProfile::from_keywords(self.ranker.rank_default(content), status)
    }

    /// Ask `recognizer` about the paragraph (if its language is supported) and build the profile
    pub async fn query<R: EntityRecognizer>(
        &self,
        recognizer: &R,
        request: EntityRequest,
    ) -> QueryProfile {
        let content = request
            .paragraphs
            .first()
            .map(|p| p.content.clone())
            .unwrap_or_default();

        let supported = request
            .language
            .as_deref()
            .is_none_or(|lang| lang == SUPPORTED_LANGUAGE);
        if !supported {
            return self.build(&content, RemoteOutcome::Skipped);
        }

        let outcome = match tokio::time::timeout(self.timeout, recognizer.recognize(&request)).await {
            Ok(result) => RemoteOutcome::from(result),
            Err(_) => RemoteOutcome::Failed(RecognitionError::Timeout),
        };
        self.build(&content, outcome)
    }
}

/// Build a query profile with the default ranker.
///
/// `remote` is `None` when recognition was not attempted.
pub fn build_query(
    content: &str,
    remote: Option<Result<EntityResponse, RecognitionError>>,
) -> QueryProfile {
    let outcome = remote.map_or(RemoteOutcome::Skipped, RemoteOutcome::from);
    QueryBuilder::default().build(content, outcome)
}

/// Main topic first, then the other entities; None if nothing usable came back
fn remote_profile(content: &str, response: &EntityResponse) -> Option<QueryProfile> {
    let paragraph = response.paragraphs.first()?;
    let mut context_keywords: Vec<ContextKeyword> = Vec::new();
    let mut offsets: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    let main_topic = paragraph.topic.as_ref().filter(|topic| !topic.text.is_empty());
    if let Some(topic) = main_topic {
        context_keywords.push(ContextKeyword {
            text: topic.text.clone(),
            uri: topic.uri(),
            entity_type: topic.entity_type.clone(),
            is_main_topic: true,
        });
    }

    for entry in &paragraph.statistic {
        let key = &entry.key;
        if key.text.is_empty() {
            continue;
        }
        offsets.insert(key.text.clone(), key.offset.clone());
        if context_keywords.iter().any(|k| k.text == key.text) {
            continue;
        }
        context_keywords.push(ContextKeyword {
            text: key.text.clone(),
            uri: key.uri(),
            entity_type: key.entity_type.clone(),
            is_main_topic: false,
        });
    }

    if context_keywords.is_empty() {
        return None;
    }

    for keyword in &context_keywords {
        let located = offsets.entry(keyword.text.clone()).or_default();
        if located.is_empty() {
            *located = find_offsets(content, &keyword.text);
        }
    }

    Some(QueryProfile {
        context_keywords,
        offsets,
        status: ExtractionStatus::Remote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTENT: &str = "Marie Curie worked in Paris with Pierre Curie at the Sorbonne.";

    const RESPONSE: &str = r#"{
        "paragraphs": [{
            "topic": {"text": "Marie Curie", "entityUri": "http://dbpedia.org/resource/Marie_Curie", "type": "Person"},
            "statistic": [
                {"key": {"text": "Marie Curie", "entityUri": "http://dbpedia.org/resource/Marie_Curie", "type": "Person", "offset": [0], "confidence": 0.9}, "value": 1},
                {"key": {"text": "Paris", "entityUri": "http://dbpedia.org/resource/Paris", "type": "Location", "offset": [22], "confidence": 0.8}, "value": 1},
                {"key": {"text": "Sorbonne", "entityUri": "not a uri", "type": "Organization"}, "value": 1},
                {"key": {"text": "Pierre Curie", "type": "Person", "offset": [33]}, "value": 2},
                {"key": {"text": "radium", "offset": []}, "value": 0}
            ]
        }]
    }"#;

    struct FixedRecognizer(Result<EntityResponse, RecognitionError>);

    impl EntityRecognizer for FixedRecognizer {
        async fn recognize(&self, _request: &EntityRequest) -> Result<EntityResponse, RecognitionError> {
            self.0.clone()
        }
    }

    struct StalledRecognizer;

    impl EntityRecognizer for StalledRecognizer {
        async fn recognize(&self, _request: &EntityRequest) -> Result<EntityResponse, RecognitionError> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_remote_entities_take_precedence() {
        let response = EntityResponse::from_json(RESPONSE).unwrap();
        let profile = QueryBuilder::default().build(CONTENT, RemoteOutcome::Response(response));

        assert_eq!(profile.status, ExtractionStatus::Remote);
        assert_eq!(
            profile.keyword_texts(),
            vec!["Marie Curie", "Paris", "Sorbonne", "Pierre Curie", "radium"]
        );
        let topic = profile.main_topic().unwrap();
        assert_eq!(topic.text, "Marie Curie");
        assert_eq!(topic.uri.as_ref().unwrap().as_str(), "http://dbpedia.org/resource/Marie_Curie");
        assert_eq!(topic.entity_type.as_deref(), Some("Person"));

        // malformed URIs are dropped, not fatal
        assert!(profile.context_keywords[2].uri.is_none());
        assert_eq!(profile.offsets["Paris"], vec![22]);
        // keywords the service gave no offsets for are located locally
        assert_eq!(profile.offsets["Sorbonne"], vec![53]);
        assert!(profile.offsets["radium"].is_empty());
    }

    #[test]
    fn test_local_offsets_match_remote_units() {
        let content = "Köln und Paris sind Städte in Europa heute.";
        let response = EntityResponse::from_json(
            r#"{"paragraphs": [{"statistic": [
                {"key": {"text": "Paris", "type": "Location", "offset": [9]}, "value": 1},
                {"key": {"text": "Europa", "type": "Location"}, "value": 1}
            ]}]}"#,
        )
        .unwrap();
        let profile = QueryBuilder::default().build(content, RemoteOutcome::Response(response));
        assert_eq!(profile.status, ExtractionStatus::Remote);
        assert_eq!(profile.offsets["Paris"], vec![9]);
        assert_eq!(profile.offsets["Europa"], vec![30]);
    }

    #[test]
    fn test_empty_response_falls_back() {
        let response = EntityResponse::from_json(r#"{"paragraphs":[{"statistic":[]}]}"#).unwrap();
        let profile = QueryBuilder::default().build(CONTENT, RemoteOutcome::Response(response));
        assert_eq!(profile.status, ExtractionStatus::FallbackEmpty);
        assert_eq!(profile.keyword_texts(), vec!["Paris", "Sorbonne", "Marie Curie", "Pierre Curie"]);
        assert_eq!(profile.offsets["Paris"], vec![22]);

        let profile = QueryBuilder::default().build(CONTENT, RemoteOutcome::Response(EntityResponse::default()));
        assert_eq!(profile.status, ExtractionStatus::FallbackEmpty);
    }

    #[test]
    fn test_failure_falls_back_with_status() {
        let profile = QueryBuilder::default().build(CONTENT, RemoteOutcome::Failed(RecognitionError::Status(503)));
        assert_eq!(profile.status, ExtractionStatus::RemoteFailed);
        assert!(!profile.context_keywords.is_empty());
        assert!(profile.main_topic().is_none());
    }

    #[test]
    fn test_build_query_without_remote() {
        let profile = build_query(CONTENT, None);
        assert_eq!(profile.status, ExtractionStatus::FallbackSkipped);
        assert_eq!(profile.keyword_texts()[0], "Paris");

        let response = EntityResponse::from_json(RESPONSE).unwrap();
        let profile = build_query(CONTENT, Some(Ok(response)));
        assert_eq!(profile.status, ExtractionStatus::Remote);
    }

    #[test]
    fn test_entities_grouped_by_type() {
        let response = EntityResponse::from_json(RESPONSE).unwrap();
        let entities = entities_from_statistic(&response.paragraphs[0].statistic);
        assert_eq!(entities.persons.len(), 2);
        assert_eq!(entities.persons[1].text, "Pierre Curie");
        assert_eq!(entities.persons[1].weight, 2);
        assert_eq!(entities.locations[0].confidence, Some(0.8));
        assert_eq!(entities.organizations[0].text, "Sorbonne");
        assert_eq!(entities.misc[0].text, "radium");
    }

    #[tokio::test]
    async fn test_query_uses_recognizer() {
        let response = EntityResponse::from_json(RESPONSE).unwrap();
        let recognizer = FixedRecognizer(Ok(response));
        let profile = QueryBuilder::default()
            .query(&recognizer, EntityRequest::single("p1", "", CONTENT))
            .await;
        assert_eq!(profile.status, ExtractionStatus::Remote);
    }

    #[tokio::test]
    async fn test_unsupported_language_skips_recognizer() {
        let recognizer = FixedRecognizer(Err(RecognitionError::Other("must not be called".into())));
        let mut request = EntityRequest::single("p1", "", CONTENT);
        request.language = Some("de".into());
        let profile = QueryBuilder::default().query(&recognizer, request).await;
        assert_eq!(profile.status, ExtractionStatus::FallbackSkipped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_recognizer_times_out() {
        let profile = QueryBuilder::default()
            .with_timeout(Duration::from_millis(250))
            .query(&StalledRecognizer, EntityRequest::single("p1", "", CONTENT))
            .await;
        assert_eq!(profile.status, ExtractionStatus::RemoteFailed);
        assert!(!profile.context_keywords.is_empty());
    }
}
