//! Mock Machine Translator for testing
//!
//! Deterministic, network-free translator used by the tests, the CLI `--mock`
//! flag and the web service when no API key is configured.
//!
//! # Example
//!
//! ```ignore
//! use gloss_align::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Echo);
//!     assert_eq!(mock.translate("banco", "es", "en").await.unwrap(), "banco");
//! }
//! ```

use crate::error::{AlignError, AlignResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockMode {
    /// (text, target_language) → translation; unknown texts fail
    Mappings(HashMap<(String, String), String>),
    /// Return the input unchanged
    Echo,
    /// Always fail with this message
    Error(String),
}

#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Simulated provider latency
    delay: Duration,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
        }
    }

    /// Mock that waits `delay_ms` before every answer
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Mappings mode built from `(text, target, translation)` triples
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let map = pairs
            .into_iter()
            .map(|(text, target, translation)| {
                ((text.to_string(), target.to_string()), translation.to_string())
            })
            .collect();
        Self::new(MockMode::Mappings(map))
    }

    fn apply_translation(&self, text: &str, target: &str) -> AlignResult<String> {
        match &self.mode {
            MockMode::Mappings(map) => map
                .get(&(text.to_string(), target.to_string()))
                .cloned()
                .ok_or_else(|| {
                    AlignError::TranslationError(format!("No mock translation for '{}'", text))
                }),
            MockMode::Echo => Ok(text.to_string()),
            MockMode::Error(msg) => Err(AlignError::TranslationError(msg.clone())),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> AlignResult<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.apply_translation(text, target_language)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mapping_translation() {
        let mock = MockTranslator::from_pairs([("banco", "en", "bank")]);
        assert_eq!(mock.translate("banco", "es", "en").await.unwrap(), "bank");
    }

    #[tokio::test]
    async fn test_mapping_is_keyed_by_target() {
        let mock = MockTranslator::from_pairs([("banco", "en", "bank")]);
        assert!(mock.translate("banco", "es", "fr").await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_mapping_fails() {
        let mock = MockTranslator::from_pairs(Vec::<(&str, &str, &str)>::new());
        match mock.translate("banco", "es", "en").await {
            Err(AlignError::TranslationError(msg)) => assert!(msg.contains("banco")),
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_echo_returns_input() {
        let mock = MockTranslator::new(MockMode::Echo);
        let text = "Fui al banco.";
        assert_eq!(mock.translate(text, "es", "en").await.unwrap(), text);
    }

    #[tokio::test]
    async fn test_error_mode() {
        let mock = MockTranslator::new(MockMode::Error("quota exceeded".to_string()));
        assert_eq!(
            mock.translate("banco", "es", "en").await,
            Err(AlignError::TranslationError("quota exceeded".to_string()))
        );
    }

    #[tokio::test]
    async fn test_delay_adds_latency() {
        let mock = MockTranslator::with_delay(MockMode::Echo, 50);
        let start = std::time::Instant::now();
        mock.translate("banco", "es", "en").await.unwrap();
        assert!(start.elapsed().as_millis() >= 50);
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::Echo);
        assert_eq!(mock.provider_name(), "Mock Translator");
    }
}
