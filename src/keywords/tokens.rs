use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Anything that is not a (Latin, incl. common German and French) letter
static NON_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("[^a-zA-ZäöüÄÖÜßÀàÂâÆæÇçÈèÉéÊêËëÎîÏïÔôŒœÙùÛûŸÿ]")
        .expect("letter class pattern should be valid")
});

/// Split on every non-letter character.
///
/// Adjacent delimiters yield empty pieces; they are kept because the
/// co-occurrence window counts positions in this stream.
pub fn split_words(text: &str) -> Vec<&str> {
    NON_LETTER.split(text).collect()
}

/// Split into sentences on `.`, `!` and `?`
pub fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
}

/// Whether the first character is an uppercase letter (and not caseless)
pub fn is_capitalized(word: &str) -> bool {
    match word.chars().next() {
        Some(first) => {
            first.to_uppercase().eq(std::iter::once(first))
                && !first.to_lowercase().eq(std::iter::once(first))
        }
        None => false,
    }
}

/// The trimmed word if it is capitalized and at least `min_len` characters long
pub fn candidate(word: &str, min_len: usize) -> Option<&str> {
    let word = word.trim();
    if word.chars().count() < min_len || !is_capitalized(word) {
        return None;
    }
    Some(word)
}

/// Length limits for compound candidates
#[derive(Debug, Clone, Copy)]
pub struct CompoundRules {
    pub min_head_len: usize,
    pub min_tail_len: usize,
    pub min_compound_len: usize,
}

/// Collect capitalized runs within each sentence as (compound) candidates.
///
/// A run starts with a capitalized word of at least `min_head_len` characters
/// and continues over capitalized words of at least `min_tail_len`. Runs are
/// joined with single spaces; runs shorter than `min_compound_len` are dropped.
/// Distinct candidates are returned in order of first appearance.
pub fn compound_candidates(text: &str, rules: &CompoundRules) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for sentence in split_sentences(text) {
        let words = split_words(sentence);
        let mut i = 0;
        while i < words.len() {
            let Some(head) = candidate(words[i], rules.min_head_len) else {
                i += 1;
                continue;
            };
            let mut compound = head.to_string();
            i += 1;
            while let Some(tail) = words.get(i).and_then(|w| candidate(w, rules.min_tail_len)) {
                compound.push(' ');
                compound.push_str(tail);
                i += 1;
            }
            if compound.chars().count() >= rules.min_compound_len && seen.insert(compound.clone()) {
                candidates.push(compound);
            }
        }
    }

    candidates
}

/// Sort shortest first (stable) and drop every candidate that is a substring
/// of a later one in that order.
pub fn containment_filter(mut candidates: Vec<String>) -> Vec<String> {
    candidates.sort_by_key(|c| c.chars().count());

    let mut kept = Vec::with_capacity(candidates.len());
    for (i, candidate) in candidates.iter().enumerate() {
        let contained = candidates[i + 1..]
            .iter()
            .any(|longer| longer.contains(candidate.as_str()));
        if !contained {
            kept.push(candidate.clone());
        }
    }
    kept
}
