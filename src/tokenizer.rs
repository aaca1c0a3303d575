use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::config::TokenizerConfig;

static NON_LETTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z\s]+").unwrap());

/// A ranked token with its occurrence count. Weight is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub weight: u32,
}

/// Reduce raw text to a ranked word list.
///
/// Non-letter characters are removed (not replaced), the remainder is
/// lower-cased and split on whitespace runs. Tokens shorter than
/// `min_word_length` and tokens on the stopword list are dropped. Counts are
/// case-insensitive. The result is sorted by descending weight with a stable
/// first-seen tie-break and capped at `max_words`.
///
/// Degenerate input yields an empty list, never an error.
pub fn analyze(text: &str, options: &TokenizerConfig) -> Vec<Word> {
    let cleaned = NON_LETTER_RE.replace_all(text, "");
    let cleaned = cleaned.to_ascii_lowercase();

    let stopwords: HashSet<String> = options
        .stopwords
        .iter()
        .map(|s| s.to_ascii_lowercase())
        .collect();

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<Word> = Vec::new();

    for token in cleaned.split_whitespace() {
        if token.len() < options.min_word_length {
            continue;
        }
        if stopwords.contains(token) {
            continue;
        }
        match index.get(token) {
            Some(&at) => entries[at].weight += 1,
            None => {
                index.insert(token.to_string(), entries.len());
                entries.push(Word {
                    text: token.to_string(),
                    weight: 1,
                });
            }
        }
    }

    let mut ranked: Vec<(usize, Word)> = entries.into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.weight.cmp(&a.1.weight).then(a.0.cmp(&b.0)));
    ranked.truncate(options.max_words);
    ranked.into_iter().map(|(_, word)| word).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> TokenizerConfig {
        TokenizerConfig::default()
    }

    #[test]
    fn frequency_ranking_orders_by_count_then_first_seen() {
        let words = analyze("cat dog cat bird cat dog", &options());
        let pairs: Vec<(&str, u32)> = words.iter().map(|w| (w.text.as_str(), w.weight)).collect();
        assert_eq!(pairs, vec![("cat", 3), ("dog", 2), ("bird", 1)]);
    }

    #[test]
    fn strips_punctuation_and_lowercases() {
        let words = analyze("Hello, world! HELLO?", &options());
        let pairs: Vec<(&str, u32)> = words.iter().map(|w| (w.text.as_str(), w.weight)).collect();
        assert_eq!(pairs, vec![("hello", 2), ("world", 1)]);
    }

    #[test]
    fn digits_and_apostrophes_collapse_inside_tokens() {
        let words = analyze("don't stop rust2025", &options());
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["dont", "stop", "rust"]);
    }

    #[test]
    fn short_tokens_are_filtered() {
        let words = analyze("an ox and a cat", &options());
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["and", "cat"]);
    }

    #[test]
    fn empty_text_yields_no_words() {
        assert!(analyze("", &options()).is_empty());
        assert!(analyze("  \t\n ", &options()).is_empty());
        assert!(analyze("1 2 3 !!", &options()).is_empty());
    }

    #[test]
    fn max_words_caps_the_ranking() {
        let opts = TokenizerConfig {
            max_words: 2,
            ..options()
        };
        let words = analyze("aaa bbb aaa ccc ddd", &opts);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["aaa", "bbb"]);
    }

    #[test]
    fn stopwords_are_dropped_case_insensitively() {
        let opts = TokenizerConfig {
            stopwords: vec!["The".to_string()],
            ..options()
        };
        let words = analyze("the quick the brown THE fox", &opts);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["quick", "brown", "fox"]);
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let words = analyze("zebra apple zebra apple mango", &options());
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["zebra", "apple", "mango"]);
    }
}
