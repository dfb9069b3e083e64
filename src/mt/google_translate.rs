//! Google Translate API v2 provider
//!
//! The API key is read from `GOOGLE_TRANSLATE_API_KEY` by
//! [`GoogleTranslateProvider::from_env`]. The HTTP client carries its own timeout;
//! the lookup applies a much shorter bounded wait on top of it.

use crate::error::{AlignError, AlignResult};
use crate::mt::translator::{MachineTranslator, normalize_language};
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

pub const API_KEY_VAR: &str = "GOOGLE_TRANSLATE_API_KEY";

const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Clone)]
pub struct GoogleTranslateProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Sentences longer than this are rejected before any request
    const MAX_CHARS: usize = 30_000;

    pub fn new(api_key: String) -> AlignResult<Self> {
        if api_key.trim().is_empty() {
            return Err(AlignError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AlignError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn from_env() -> AlignResult<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            AlignError::ConfigError(format!("{} environment variable not set", API_KEY_VAR))
        })?;
        Self::new(api_key)
    }

    /// Point the provider at another endpoint, e.g. a local proxy
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn extract_translation(json: &serde_json::Value) -> AlignResult<String> {
        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AlignError::TranslationError(
                    "Invalid API response: missing 'data.translations[0].translatedText'"
                        .to_string(),
                )
            })
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> AlignResult<String> {
        let source = normalize_language(source_language)?;
        let target = normalize_language(target_language)?;

        if text.trim().is_empty() {
            return Ok(String::new());
        }
        if text.chars().count() > Self::MAX_CHARS {
            return Err(AlignError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS
            )));
        }

        let body = json!({
            "q": [text],
            "source": source,
            "target": target,
            "format": "text"
        });

        let url = format!("{}?key={}", self.base_url, self.api_key);
        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(if status.is_client_error() {
                AlignError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                AlignError::TranslationError(format!(
                    "API server error ({}): {}",
                    status, error_text
                ))
            });
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            AlignError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;
        Self::extract_translation(&json)
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}
