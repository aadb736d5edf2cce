//! Tokenization and keyword extraction.
//!
//! Two tokenizers feed the grading strategies: a stop-word-filtered keyword
//! extractor for the keyword-overlap strategy, and a permissive tokenizer
//! (duplicates preserved) for TF-IDF frequency counting. Both are pure
//! functions over the input text.

use std::collections::HashSet;

/// Common words excluded from keyword extraction as uninformative.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for",
    "of", "with", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "can", "this", "that", "these", "those",
];

/// Split text into maximal runs of ASCII-alphabetic characters, lowercased.
///
/// Digits and punctuation are token separators and are discarded.
fn alphabetic_runs(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
}

/// Extract a deduplicated list of keywords from `text`.
///
/// Keywords are lowercase alphabetic tokens of length >= 3 that are not
/// stop words. First-occurrence order is preserved so feedback listing
/// matched/missed keywords is deterministic.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    alphabetic_runs(text)
        .filter(|w| w.len() >= 3 && !STOP_WORDS.contains(&w.as_str()))
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

/// Permissively tokenize `text` for frequency counting.
///
/// All lowercase alphabetic tokens, length >= 1, duplicates preserved,
/// no stop-word filtering.
pub fn tokenize(text: &str) -> Vec<String> {
    alphabetic_runs(text).collect()
}

/// Count whitespace-separated words, used by the length factor.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_filter_stop_words_and_short_tokens() {
        let kws = extract_keywords("The cat sat on a mat");
        assert_eq!(kws, vec!["cat", "sat", "mat"]);
    }

    #[test]
    fn keywords_deduplicate_preserving_order() {
        let kws = extract_keywords("Object Oriented Programming is object oriented");
        assert_eq!(kws, vec!["object", "oriented", "programming"]);
    }

    #[test]
    fn keywords_all_stop_words_yield_empty() {
        assert!(extract_keywords("the a an").is_empty());
    }

    #[test]
    fn keywords_split_on_punctuation_and_digits() {
        let kws = extract_keywords("TCP/IP uses 3-way handshakes");
        assert_eq!(kws, vec!["tcp", "uses", "way", "handshakes"]);
    }

    #[test]
    fn tokenize_keeps_duplicates_and_short_tokens() {
        let tokens = tokenize("a cat and a dog");
        assert_eq!(tokens, vec!["a", "cat", "and", "a", "dog"]);
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("123 !?").is_empty());
    }

    #[test]
    fn word_count_is_whitespace_based() {
        assert_eq!(word_count("It is Object Oriented Programming"), 5);
        assert_eq!(word_count(""), 0);
    }
}
