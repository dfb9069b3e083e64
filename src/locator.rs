//! Locating the chosen candidate in the translated sentence for highlighting

use crate::context::AlignmentContext;
use crate::data::MatchedWord;
use crate::similarity::similarity;
use crate::tokenizer::Word;

/// A fuzzy match must score above this to be highlighted
pub const LOCATE_THRESHOLD: f64 = 0.7;

/// Word of the translated sentence to highlight for `chosen_text`
///
/// Exact normalized equality wins. Otherwise the best fuzzy match above
/// [`LOCATE_THRESHOLD`] is used. `None` means the sentence should be shown
/// without a highlight, including when no translation is available.
pub fn locate(chosen_text: &str, context: &mut AlignmentContext) -> Option<MatchedWord> {
    let target = context.normalized(chosen_text);
    let words = context.translated_words()?;
    let found = locate_in_words(&target, words);
    if found.is_none() {
        tracing::debug!(chosen_text, "no word to highlight");
    }
    found
}

/// Locate an already normalized text among `words`
pub fn locate_in_words(normalized: &str, words: &[Word]) -> Option<MatchedWord> {
    if normalized.is_empty() {
        return None;
    }

    if let Some(index) = words.iter().position(|w| w.normalized() == normalized) {
        return Some(matched(index, &words[index]));
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, word) in words.iter().enumerate() {
        let score = similarity(normalized, word.normalized());
        if score > LOCATE_THRESHOLD && best.is_none_or(|(_, s)| score > s) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| matched(index, &words[index]))
}

fn matched(index: usize, word: &Word) -> MatchedWord {
    MatchedWord {
        index,
        text: word.text.clone(),
        start: word.start,
        end: word.end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(translation: &str) -> AlignmentContext {
        AlignmentContext::new("banco", "Fui al banco.", "es", "en").with_translation(translation)
    }

    #[test]
    fn test_exact_match_ignores_case_and_punctuation() {
        let mut ctx = context("Went to the Bank, quickly");
        let found = locate("bank", &mut ctx).unwrap();
        assert_eq!(found.index, 3);
        assert_eq!(found.text, "Bank");
        assert_eq!(found.start, 12);
        assert_eq!(found.end, 16);
    }

    #[test]
    fn test_exact_match_prefers_first_occurrence() {
        let mut ctx = context("bank to bank");
        assert_eq!(locate("bank", &mut ctx).unwrap().index, 0);
    }

    #[test]
    fn test_fuzzy_match_above_threshold() {
        // 9 of 10 characters contained: 0.9 * 0.8 = 0.72
        let mut ctx = context("the bookstores opened");
        let found = locate("bookstore", &mut ctx).unwrap();
        assert_eq!(found.text, "bookstores");
    }

    #[test]
    fn test_fuzzy_match_below_threshold_is_none() {
        // "banks" only reaches 0.64
        let mut ctx = context("the banks opened");
        assert!(locate("bank", &mut ctx).is_none());
    }

    #[test]
    fn test_possessive_apostrophe_splits_word() {
        let mut ctx = context("The bank's doors opened.");
        let found = locate("bank", &mut ctx).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.text, "bank");
        assert_eq!((found.start, found.end), (4, 8));
    }

    #[test]
    fn test_elided_article_splits_word() {
        let mut ctx = context("L'homme est parti");
        let found = locate("homme", &mut ctx).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.text, "homme");
    }

    #[test]
    fn test_no_translation_is_none() {
        let mut ctx = AlignmentContext::new("banco", "Fui al banco.", "es", "en");
        assert!(locate("bank", &mut ctx).is_none());
    }

    #[test]
    fn test_empty_text_is_none() {
        let mut ctx = context("the bank");
        assert!(locate("", &mut ctx).is_none());
        assert!(locate("...", &mut ctx).is_none());
    }

    #[test]
    fn test_accented_translation() {
        let mut ctx = context("Fui al Banco, señor");
        assert_eq!(locate("senor", &mut ctx).unwrap().text, "señor");
    }
}
