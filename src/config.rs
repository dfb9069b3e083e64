//! Runtime configuration
//!
//! Values come from defaults, a JSON file, or environment variables:
//!
//! - `GLOSS_ALIGN_TRANSLATION_TIMEOUT_MS`: bounded wait for machine translation
//! - `GLOSS_ALIGN_MAX_CANDIDATES`: dictionary candidates kept per definition

use crate::error::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const TIMEOUT_VAR: &str = "GLOSS_ALIGN_TRANSLATION_TIMEOUT_MS";
pub const MAX_CANDIDATES_VAR: &str = "GLOSS_ALIGN_MAX_CANDIDATES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// How long a lookup waits for each machine translation
    pub translation_timeout_ms: u64,
    pub max_definition_candidates: usize,
    /// Try reverse-direction dictionary entries when forward ones are missing
    pub enable_reverse_lookup: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            translation_timeout_ms: 300,
            max_definition_candidates: 10,
            enable_reverse_lookup: true,
        }
    }
}

impl AlignConfig {
    pub fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation_timeout_ms)
    }

    /// Defaults overridden by whichever environment variables are set
    pub fn from_env() -> AlignResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_json_file(path: &Path) -> AlignResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AlignError::ConfigError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| AlignError::ConfigError(format!("Invalid config '{}': {}", path.display(), e)))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AlignResult<Self> {
        let mut config = Self::default();
        if let Some(value) = lookup(TIMEOUT_VAR) {
            config.translation_timeout_ms = parse_var(TIMEOUT_VAR, &value)?;
        }
        if let Some(value) = lookup(MAX_CANDIDATES_VAR) {
            config.max_definition_candidates = parse_var(MAX_CANDIDATES_VAR, &value)?;
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> AlignResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AlignError::ConfigError(format!("{} has invalid value '{}'", name, value)))
}
