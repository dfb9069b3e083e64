//! Machine translation provider trait and language tag helpers
//!
//! The engine never talks to a translation service directly. Whoever builds a
//! lookup hands it an implementation of [`MachineTranslator`]; failures and
//! timeouts of that implementation only ever make the translation "unavailable".
//!
//! # Example
//!
//! ```ignore
//! use gloss_align::mt::{MachineTranslator, GoogleTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let sentence = provider.translate("Fui al banco a sacar dinero.", "es", "en").await?;
//!     println!("{}", sentence); // "I went to the bank to withdraw money."
//!     Ok(())
//! }
//! ```

use crate::error::{AlignError, AlignResult};
use async_trait::async_trait;
use icu_locale::LanguageIdentifier;

/// Generic trait for machine translation providers
///
/// Used twice per lookup: once for the whole sentence and once for the
/// selected word alone.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate `text` from `source_language` to `target_language`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(AlignError)` - If the provider failed; callers treat this as unavailable
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> AlignResult<String>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}

/// Parse a BCP 47 language tag
///
/// Underscores are accepted as separators (`pt_BR`).
pub fn parse_language(tag: &str) -> AlignResult<LanguageIdentifier> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(AlignError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }
    LanguageIdentifier::try_from_str(&tag.replace('_', "-"))
        .map_err(|e| AlignError::InvalidLanguage(format!("'{}': {:?}", tag, e)))
}

/// Base language subtag of a tag
///
/// - `pt-BR` → `pt`
/// - `zh-Hans` → `zh`
/// - `EN` → `en`
pub fn normalize_language(tag: &str) -> AlignResult<String> {
    let id = parse_language(tag)?;
    Ok(id.language.as_str().to_string())
}

/// Check that a tag parses
pub fn validate_language(tag: &str) -> AlignResult<()> {
    parse_language(tag).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language_with_region() {
        assert_eq!(normalize_language("en-US").unwrap(), "en");
        assert_eq!(normalize_language("pt-BR").unwrap(), "pt");
        assert_eq!(normalize_language("pt_BR").unwrap(), "pt");
    }

    #[test]
    fn test_normalize_language_with_script() {
        assert_eq!(normalize_language("zh-Hans").unwrap(), "zh");
        assert_eq!(normalize_language("sr-Latn").unwrap(), "sr");
    }

    #[test]
    fn test_normalize_language_case_insensitive() {
        assert_eq!(normalize_language("ES").unwrap(), "es");
        assert_eq!(normalize_language(" de ").unwrap(), "de");
    }

    #[test]
    fn test_validate_language_valid_codes() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("es-419").is_ok());
        assert!(validate_language("zh-Hant-TW").is_ok());
    }

    #[test]
    fn test_validate_language_invalid_codes() {
        assert!(validate_language("").is_err());
        assert!(validate_language("en@invalid").is_err());
        assert!(validate_language("toolonglanguage").is_err());
    }

    #[test]
    fn test_validate_language_error_variant() {
        match validate_language("fr#bad") {
            Err(AlignError::InvalidLanguage(msg)) => assert!(msg.contains("fr#bad")),
            other => panic!("Expected InvalidLanguage, got {:?}", other),
        }
    }
}
