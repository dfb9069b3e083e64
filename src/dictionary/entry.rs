//! Dictionary entries and definition parsing
//!
//! Entries follow the bidirectional language-pack layout: a forward entry maps a
//! source-language lemma to a target-language definition, a reverse entry was
//! derived from the opposite pack and maps the same way for the other direction.
//! Definitions are free text such as `"<b>bank</b>; bench, (finance) bank"`.

use crate::data::Candidate;
use crate::normalize::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is a valid regex"));

static LEADING_GLOSS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(([^)]*)\)\s*(.*)$").expect("gloss pattern is a valid regex")
});

const SEPARATORS: [char; 4] = [';', '|', ',', '\n'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub lemma: String,
    pub definition: String,
    #[serde(default)]
    pub direction: Direction,
    pub source_language: String,
    pub target_language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
}

impl DictionaryEntry {
    pub fn forward(
        lemma: impl Into<String>,
        definition: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            lemma: lemma.into(),
            definition: definition.into(),
            direction: Direction::Forward,
            source_language: source_language.into(),
            target_language: target_language.into(),
            part_of_speech: None,
        }
    }

    pub fn reverse(
        lemma: impl Into<String>,
        definition: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            direction: Direction::Reverse,
            ..Self::forward(lemma, definition, source_language, target_language)
        }
    }

    pub fn with_part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.part_of_speech = Some(part_of_speech.into());
        self
    }

    /// Dictionary candidates listed in the definition, in definition order
    pub fn candidates(&self, limit: usize) -> Vec<Candidate> {
        split_definition(&self.definition, limit)
            .into_iter()
            .map(|(text, gloss)| {
                let mut candidate = Candidate::dictionary(text);
                candidate.part_of_speech = self.part_of_speech.clone();
                candidate.context = gloss;
                candidate
            })
            .collect()
    }
}

/// Split a definition into `(translation, gloss)` pairs
///
/// HTML tags are removed, the text is split on `;`, `|`, `,` and newlines, and
/// empty pieces are dropped. A leading parenthesised note becomes the gloss.
/// Repeats (compared in normalized form) keep their first occurrence only.
///
/// # Example
///
/// ```ignore
/// let parts = split_definition("<i>(finance)</i> bank; bench", 10);
/// assert_eq!(parts[0], ("bank".to_string(), Some("finance".to_string())));
/// assert_eq!(parts[1], ("bench".to_string(), None));
/// ```
pub fn split_definition(definition: &str, limit: usize) -> Vec<(String, Option<String>)> {
    let clean = HTML_TAG.replace_all(definition, "");
    let mut seen = HashSet::new();
    let mut parts = Vec::new();

    for piece in clean.split(SEPARATORS) {
        if parts.len() >= limit {
            break;
        }
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        let (text, gloss) = match LEADING_GLOSS.captures(piece) {
            Some(caps) => {
                let gloss = caps[1].trim();
                let text = caps[2].trim();
                let gloss = (!gloss.is_empty()).then(|| gloss.to_string());
                (text.to_string(), gloss)
            }
            None => (piece.to_string(), None),
        };

        if text.is_empty() || !seen.insert(normalize(&text)) {
            continue;
        }
        parts.push((text, gloss));
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(parts: &[(String, Option<String>)]) -> Vec<&str> {
        parts.iter().map(|(t, _)| t.as_str()).collect()
    }

    #[test]
    fn test_split_on_all_separators() {
        let parts = split_definition("bank; bench | seat, pew\nshoal", 10);
        assert_eq!(texts(&parts), vec!["bank", "bench", "seat", "pew", "shoal"]);
    }

    #[test]
    fn test_strips_html() {
        let parts = split_definition("<b>bank</b>; <i>bench</i>", 10);
        assert_eq!(texts(&parts), vec!["bank", "bench"]);
    }

    #[test]
    fn test_drops_empty_pieces() {
        let parts = split_definition(";; bank ,, ; ", 10);
        assert_eq!(texts(&parts), vec!["bank"]);
    }

    #[test]
    fn test_deduplicates_preserving_first() {
        let parts = split_definition("Bank; bench; bank; Bénch", 10);
        assert_eq!(texts(&parts), vec!["Bank", "bench"]);
    }

    #[test]
    fn test_respects_limit() {
        let parts = split_definition("a1; a2; a3; a4", 2);
        assert_eq!(texts(&parts), vec!["a1", "a2"]);
        assert!(split_definition("a1; a2", 0).is_empty());
    }

    #[test]
    fn test_leading_gloss() {
        let parts = split_definition("(finance) bank; (furniture) bench; shore", 10);
        assert_eq!(parts[0], ("bank".to_string(), Some("finance".to_string())));
        assert_eq!(parts[1], ("bench".to_string(), Some("furniture".to_string())));
        assert_eq!(parts[2], ("shore".to_string(), None));
    }

    #[test]
    fn test_gloss_without_text_is_dropped() {
        let parts = split_definition("(archaic); bank", 10);
        assert_eq!(texts(&parts), vec!["bank"]);
    }

    #[test]
    fn test_entry_candidates_carry_part_of_speech() {
        let entry = DictionaryEntry::forward("banco", "(finance) bank; bench", "es", "en")
            .with_part_of_speech("noun");
        let candidates = entry.candidates(10);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.is_dictionary()));
        assert_eq!(candidates[0].part_of_speech.as_deref(), Some("noun"));
        assert_eq!(candidates[0].context.as_deref(), Some("finance"));
        assert_eq!(candidates[1].context, None);
    }

    #[test]
    fn test_direction_defaults_to_forward() {
        let entry: DictionaryEntry = serde_json::from_str(
            r#"{"lemma":"banco","definition":"bank","source_language":"es","target_language":"en"}"#,
        )
        .unwrap();
        assert_eq!(entry.direction, Direction::Forward);

        let entry: DictionaryEntry = serde_json::from_str(
            r#"{"lemma":"bank","definition":"banco","direction":"reverse","source_language":"en","target_language":"es"}"#,
        )
        .unwrap();
        assert_eq!(entry.direction, Direction::Reverse);
    }
}
