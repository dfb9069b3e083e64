//! Sentence tokenization
//!
//! A sentence is split on runs of whitespace and Unicode punctuation. Every
//! `\p{P}` character separates words, apostrophes included, so `l'homme` yields
//! `l` and `homme`. Each word keeps its byte offsets so the presentation layer
//! can highlight it in place.

use crate::normalize::normalize;
use regex::Regex;
use std::cell::OnceCell;
use std::sync::LazyLock;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s\p{P}]+").expect("word pattern is a valid regex")
});

/// A contiguous run of word characters in a sentence
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    normalized: OnceCell<String>,
}

impl Word {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            normalized: OnceCell::new(),
        }
    }

    /// Normalized form, computed on first use
    pub fn normalized(&self) -> &str {
        self.normalized.get_or_init(|| normalize(&self.text))
    }
}

// The memoized form is derived from `text` and takes no part in equality
impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.start == other.start && self.end == other.end
    }
}

impl Eq for Word {}

/// Split a sentence into words, dropping empty tokens
///
/// # Example
///
/// ```ignore
/// let words = tokenize("I went to the Bank, then home.");
/// let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
/// assert_eq!(texts, vec!["I", "went", "to", "the", "Bank", "then", "home"]);
/// ```
pub fn tokenize(sentence: &str) -> Vec<Word> {
    WORD_PATTERN
        .find_iter(sentence)
        .map(|m| Word::new(m.as_str(), m.start(), m.end()))
        .filter(|w| !w.text.is_empty())
        .collect()
}

/// Word texts only, for callers that do not need offsets
pub fn tokenize_texts(sentence: &str) -> Vec<String> {
    tokenize(sentence).into_iter().map(|w| w.text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_whitespace_and_punctuation() {
        assert_eq!(
            tokenize_texts("I went to the bank to withdraw money."),
            vec!["I", "went", "to", "the", "bank", "to", "withdraw", "money"]
        );
        assert_eq!(
            tokenize_texts("¿Dónde está el banco?"),
            vec!["Dónde", "está", "el", "banco"]
        );
    }

    #[test]
    fn test_collapses_runs_of_separators() {
        assert_eq!(tokenize_texts("one,  two...three"), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_apostrophes_separate_words() {
        assert_eq!(
            tokenize_texts("C'est l'homme, don't go"),
            vec!["C", "est", "l", "homme", "don", "t", "go"]
        );
        assert_eq!(tokenize_texts("the bank’s doors"), vec!["the", "bank", "s", "doors"]);
        assert_eq!(tokenize_texts("'quoted'"), vec!["quoted"]);
    }

    #[test]
    fn test_offsets_point_into_sentence() {
        let sentence = "Él fue al Bank, ayer.";
        for word in tokenize(sentence) {
            assert_eq!(&sentence[word.start..word.end], word.text);
        }
        let bank = tokenize(sentence)
            .into_iter()
            .find(|w| w.text == "Bank")
            .unwrap();
        assert_eq!(bank.start, 11);
        assert_eq!(bank.end, 15);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("?! ... ,").is_empty());
    }

    #[test]
    fn test_non_latin_scripts() {
        assert_eq!(tokenize_texts("Я иду в банк."), vec!["Я", "иду", "в", "банк"]);
    }

    #[test]
    fn test_word_normalized_is_cached() {
        let word = Word::new("Bank", 0, 4);
        let first = word.normalized() as *const str;
        let second = word.normalized() as *const str;
        assert_eq!(word.normalized(), "bank");
        assert_eq!(first, second);
    }
}
