//! Expected position of the selected word in its source sentence
//!
//! The source sentence is tokenized the same way as the translation. The first
//! token whose normalized form contains the normalized selected word, or is
//! contained by it, gives the position. No match yields `None` rather than a
//! default index, so an unknown position never earns proximity credit.

use crate::normalize::normalize;
use crate::tokenizer::tokenize;

/// Index of `selected_word` among the words of `source_sentence`
///
/// # Example
///
/// ```ignore
/// assert_eq!(expected_position("banco", "Fui al banco a sacar dinero."), Some(2));
/// assert_eq!(expected_position("casa", "Fui al banco."), None);
/// ```
pub fn expected_position(selected_word: &str, source_sentence: &str) -> Option<usize> {
    position_of_normalized(&normalize(selected_word), source_sentence)
}

/// Same as [`expected_position`] for an already normalized word
pub fn position_of_normalized(selected: &str, source_sentence: &str) -> Option<usize> {
    if selected.is_empty() {
        return None;
    }

    let found = tokenize(source_sentence).iter().position(|word| {
        let token = word.normalized();
        !token.is_empty() && (token.contains(selected) || selected.contains(token))
    });

    if found.is_none() {
        tracing::debug!(selected, "selected word not found in source sentence");
    }
    found
}

/// Proximity of `actual` to `expected` over a sentence of `word_count` words
///
/// `1 - |expected - actual| / word_count`, clamped to `[0, 1]`. Unknown expected
/// position or an empty sentence scores `0`.
pub fn position_score(expected: Option<usize>, actual: usize, word_count: usize) -> f64 {
    let Some(expected) = expected else {
        return 0.0;
    };
    if word_count == 0 {
        return 0.0;
    }
    let distance = expected.abs_diff(actual) as f64;
    (1.0 - distance / word_count as f64).clamp(0.0, 1.0)
}
