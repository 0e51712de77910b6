// Local keyword extraction for when entity recognition gives nothing

pub mod graph;
pub mod tokens;

#[cfg(test)]
mod tests;

use crate::config::RankerConfig;
use crate::results::{Keyword, KeywordResult, RankingPath};
use graph::{KeywordGraph, Propagation};
use std::collections::HashSet;
use tokens::CompoundRules;

/// Fallback keyword extractor. Holds only configuration; every call starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct KeywordRanker {
    config: RankerConfig,
}

impl KeywordRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank with the configured default result size
    pub fn rank_default(&self, text: &str) -> KeywordResult {
        self.rank(text, self.config.default_k)
    }

    /// Extract keywords from `text`, taking the `k` best graph terms when ranking is needed.
    ///
    /// Only empty (or whitespace-only) input gives an empty result.
    pub fn rank(&self, text: &str, k: usize) -> KeywordResult {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return KeywordResult::empty();
        }

        let words = tokens::split_words(trimmed);
        if words.len() < self.config.short_text_tokens {
            ::log::debug!("Short text ({} pieces), using it as the keyword", words.len());
            return self.locate(text, vec![trimmed.to_string()], RankingPath::ShortText);
        }

        let candidates = tokens::containment_filter(tokens::compound_candidates(
            trimmed,
            &self.compound_rules(),
        ));

        let (terms, path) = if candidates.len() > self.config.listing_threshold {
            self.rank_candidates(&words, candidates, k)
        } else {
            (candidates, RankingPath::Listing)
        };

        if terms.is_empty() {
            ::log::debug!("No capitalized candidates, falling back to plain tokens");
            return self.locate(text, self.token_dump(&words), RankingPath::TokenDump);
        }

        ::log::debug!("Extracted {} keywords via {:?}", terms.len(), path);
        self.locate(text, terms, path)
    }

    fn compound_rules(&self) -> CompoundRules {
        CompoundRules {
            min_head_len: self.config.min_head_len,
            min_tail_len: self.config.min_tail_len,
            min_compound_len: self.config.min_compound_len,
        }
    }

    /// Rank single tokens on the co-occurrence graph and map each of the top
    /// `k` to the first candidate containing it
    fn rank_candidates(
        &self,
        words: &[&str],
        candidates: Vec<String>,
        k: usize,
    ) -> (Vec<String>, RankingPath) {
        let graph = KeywordGraph::build(words, self.config.min_node_len, self.config.window);
        let ranking = graph.rank(&Propagation {
            damping: self.config.damping,
            max_iter: self.config.max_iter,
            delta: self.config.delta,
        });

        let mut mapped: Vec<String> = Vec::new();
        for (term, _) in graph.top_k(&ranking, k) {
            let Some(candidate) = candidates.iter().find(|c| c.contains(term)) else {
                continue;
            };
            if !mapped.contains(candidate) {
                mapped.push(candidate.clone());
            }
        }

        if mapped.len() >= self.config.min_mapped_keywords {
            (mapped, RankingPath::Graph)
        } else {
            ::log::debug!(
                "Graph ranking kept only {} of {} candidates, listing all",
                mapped.len(),
                candidates.len()
            );
            (candidates, RankingPath::Listing)
        }
    }

    /// Distinct plain tokens in document order
    fn token_dump(&self, words: &[&str]) -> Vec<String> {
        let mut seen = HashSet::new();
        words
            .iter()
            .map(|w| w.trim())
            .filter(|w| w.chars().count() >= self.config.token_dump_min_len)
            .filter(|w| seen.insert(*w))
            .take(self.config.token_dump_count)
            .map(str::to_string)
            .collect()
    }

    fn locate(&self, source: &str, terms: Vec<String>, path: RankingPath) -> KeywordResult {
        let keywords = terms
            .into_iter()
            .map(|term| Keyword::locate(term, source))
            .collect();
        KeywordResult::new(keywords, path)
    }
}

/// Rank keywords with the default configuration
pub fn rank_keywords(text: &str, k: usize) -> Vec<Keyword> {
    KeywordRanker::default().rank(text, k).keywords
}
