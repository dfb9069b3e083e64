//! Per-lookup alignment context and its memo tables
//!
//! An [`AlignmentContext`] bundles everything one lookup needs: the selected word,
//! the source sentence, the language pair and, once machine translation has
//! delivered it, the tokenized translated sentence. Memo tables only grow during
//! a session. Replacing the translated sentence clears all of them.
//!
//! A context has a single owner. It is `Send` but not `Sync`; independent
//! contexts can be used from different threads.

use crate::data::CandidateScore;
use crate::normalize::normalize;
use crate::position;
use crate::tokenizer::{Word, tokenize};
use std::collections::HashMap;

/// The machine-translated sentence, tokenized once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedSentence {
    pub text: String,
    pub words: Vec<Word>,
}

impl TranslatedSentence {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let words = tokenize(&text);
        Self { text, words }
    }
}

#[derive(Debug, Default)]
struct MemoTables {
    /// raw text -> normalized text
    normalized: HashMap<String, String>,
    /// (normalized candidate, expected position) -> scores
    scores: HashMap<(String, Option<usize>), CandidateScore>,
    /// `None` until computed, then the estimator's answer
    expected_position: Option<Option<usize>>,
}

#[derive(Debug)]
pub struct AlignmentContext {
    selected_word: String,
    source_sentence: String,
    source_language: String,
    target_language: String,
    translation: Option<TranslatedSentence>,
    memo: MemoTables,
}

impl AlignmentContext {
    /// Context without a translated sentence yet
    pub fn new(
        selected_word: impl Into<String>,
        source_sentence: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            selected_word: selected_word.into(),
            source_sentence: source_sentence.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            translation: None,
            memo: MemoTables::default(),
        }
    }

    /// Builder form of [`AlignmentContext::set_translation`]
    pub fn with_translation(mut self, translated_sentence: impl Into<String>) -> Self {
        self.set_translation(Some(translated_sentence.into()));
        self
    }

    pub fn selected_word(&self) -> &str {
        &self.selected_word
    }

    pub fn source_sentence(&self) -> &str {
        &self.source_sentence
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn translation(&self) -> Option<&TranslatedSentence> {
        self.translation.as_ref()
    }

    /// Words of the translated sentence, `None` while translation is unavailable
    pub fn translated_words(&self) -> Option<&[Word]> {
        self.translation.as_ref().map(|t| t.words.as_slice())
    }

    pub fn has_translation(&self) -> bool {
        self.translation.is_some()
    }

    /// Replace the translated sentence
    ///
    /// Returns `true` when the sentence actually changed, in which case every memo
    /// table has been cleared. Setting the same text again keeps the caches.
    pub fn set_translation(&mut self, translated_sentence: Option<String>) -> bool {
        let unchanged = match (&self.translation, &translated_sentence) {
            (Some(current), Some(next)) => current.text == *next,
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return false;
        }

        self.translation = translated_sentence.map(TranslatedSentence::new);
        self.memo = MemoTables::default();
        tracing::debug!(
            words = self.translated_words().map_or(0, |w| w.len()),
            "translated sentence replaced, caches cleared"
        );
        true
    }

    /// Normalized form of `raw`, memoized
    pub fn normalized(&mut self, raw: &str) -> String {
        if let Some(hit) = self.memo.normalized.get(raw) {
            return hit.clone();
        }
        let value = normalize(raw);
        self.memo.normalized.insert(raw.to_string(), value.clone());
        value
    }

    /// Index of the selected word in the source sentence, memoized
    pub fn expected_position(&mut self) -> Option<usize> {
        if let Some(known) = self.memo.expected_position {
            return known;
        }
        let selected_word = self.selected_word.clone();
        let selected = self.normalized(&selected_word);
        let found = position::position_of_normalized(&selected, &self.source_sentence);
        self.memo.expected_position = Some(found);
        found
    }

    pub fn cached_score(
        &self,
        normalized_candidate: &str,
        expected: Option<usize>,
    ) -> Option<&CandidateScore> {
        self.memo
            .scores
            .get(&(normalized_candidate.to_string(), expected))
    }

    pub fn store_score(
        &mut self,
        normalized_candidate: String,
        expected: Option<usize>,
        score: CandidateScore,
    ) {
        self.memo.scores.insert((normalized_candidate, expected), score);
    }

    /// Number of memoized candidate scores
    pub fn cached_score_count(&self) -> usize {
        self.memo.scores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> AlignmentContext {
        AlignmentContext::new("banco", "Fui al banco a sacar dinero.", "es", "en")
    }

    #[test]
    fn test_new_context_has_no_translation() {
        let ctx = context();
        assert!(!ctx.has_translation());
        assert!(ctx.translated_words().is_none());
        assert_eq!(ctx.selected_word(), "banco");
        assert_eq!(ctx.source_language(), "es");
        assert_eq!(ctx.target_language(), "en");
    }

    #[test]
    fn test_translation_is_tokenized_once() {
        let ctx = context().with_translation("I went to the bank to withdraw money.");
        let words = ctx.translated_words().unwrap();
        assert_eq!(words.len(), 8);
        assert_eq!(words[4].text, "bank");
    }

    #[test]
    fn test_normalized_is_memoized() {
        let mut ctx = context();
        assert_eq!(ctx.normalized("Dinero."), "dinero");
        assert_eq!(ctx.memo.normalized.len(), 1);
        assert_eq!(ctx.normalized("Dinero."), "dinero");
        assert_eq!(ctx.memo.normalized.len(), 1);
    }

    #[test]
    fn test_expected_position_found() {
        let mut ctx = context();
        assert_eq!(ctx.expected_position(), Some(2));
        assert_eq!(ctx.memo.expected_position, Some(Some(2)));
    }

    #[test]
    fn test_expected_position_unknown() {
        let mut ctx = AlignmentContext::new("xyz", "Fui al banco.", "es", "en");
        assert_eq!(ctx.expected_position(), None);
    }

    #[test]
    fn test_changing_translation_clears_caches() {
        let mut ctx = context().with_translation("I went to the bank.");
        ctx.store_score("bank".to_string(), Some(2), CandidateScore::default());
        ctx.normalized("Bank");
        assert_eq!(ctx.cached_score_count(), 1);

        assert!(ctx.set_translation(Some("I went to the bench.".to_string())));
        assert_eq!(ctx.cached_score_count(), 0);
        assert!(ctx.memo.normalized.is_empty());
        assert_eq!(ctx.translated_words().unwrap()[4].text, "bench");
    }

    #[test]
    fn test_same_translation_keeps_caches() {
        let mut ctx = context().with_translation("I went to the bank.");
        ctx.store_score("bank".to_string(), Some(2), CandidateScore::default());
        assert!(!ctx.set_translation(Some("I went to the bank.".to_string())));
        assert_eq!(ctx.cached_score_count(), 1);
        assert!(ctx.cached_score("bank", Some(2)).is_some());
        assert!(ctx.cached_score("bank", None).is_none());
    }

    #[test]
    fn test_clearing_translation() {
        let mut ctx = context().with_translation("I went to the bank.");
        assert!(ctx.set_translation(None));
        assert!(!ctx.has_translation());
    }
}
