//! Lookup orchestration
//!
//! Gathers dictionary candidates and machine translations for one selected word
//! and hands them to a [`LookupSession`]. Machine translation is bounded by
//! [`AlignConfig::translation_timeout`]; a slow or failing provider only means the
//! session starts without a translated sentence or without a machine candidate.

use crate::config::AlignConfig;
use crate::context::AlignmentContext;
use crate::data::Candidate;
use crate::dictionary::{DictionaryPipeline, DictionaryProvider};
use crate::error::AlignResult;
use crate::mt::{MachineTranslator, validate_language};
use crate::session::LookupSession;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRequest {
    pub word: String,
    pub sentence: String,
    pub source_language: String,
    pub target_language: String,
    /// Translated sentence supplied by the caller; skips sentence translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl LookupRequest {
    pub fn new(
        word: impl Into<String>,
        sentence: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            sentence: sentence.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            translation: None,
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }
}

pub struct Lookup {
    dictionary: Arc<dyn DictionaryProvider>,
    translator: Arc<dyn MachineTranslator>,
    pipeline: DictionaryPipeline,
    config: AlignConfig,
}

impl Lookup {
    pub fn new(
        dictionary: Arc<dyn DictionaryProvider>,
        translator: Arc<dyn MachineTranslator>,
        config: AlignConfig,
    ) -> Self {
        Self {
            dictionary,
            translator,
            pipeline: DictionaryPipeline::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Collect candidates and translations, then rank and highlight
    ///
    /// The returned session is `Idle` when neither the dictionary nor the
    /// single-word translation produced a candidate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLanguage` for an unparsable language tag. Provider
    /// failures are logged and never returned.
    pub async fn run(&self, request: &LookupRequest) -> AlignResult<LookupSession> {
        validate_language(&request.source_language)?;
        validate_language(&request.target_language)?;

        let word = request.word.trim();
        let source = request.source_language.as_str();
        let target = request.target_language.as_str();

        if word.is_empty() {
            debug!("Blank word, nothing to look up");
            let context = AlignmentContext::new(word, request.sentence.as_str(), source, target);
            return Ok(LookupSession::new(context, Vec::new()));
        }

        let dictionary = self.pipeline.lookup(self.dictionary.as_ref(), word, source, target);
        let sentence = async {
            match request.translation.as_deref().map(str::trim) {
                Some(text) if !text.is_empty() => Some(text.to_string()),
                Some(_) => {
                    debug!("Supplied translation is blank");
                    None
                }
                None => self.translate_bounded(&request.sentence, source, target).await,
            }
        };
        let single = self.translate_bounded(word, source, target);
        let (hit, translated_sentence, single) = tokio::join!(dictionary, sentence, single);

        let mut candidates = match hit {
            Some(hit) => {
                info!(
                    word,
                    strategy = %hit.strategy,
                    count = hit.candidates.len(),
                    "Dictionary lookup"
                );
                hit.candidates
            }
            None => Vec::new(),
        };
        match single {
            Some(text) if text.split_whitespace().nth(1).is_some() => {
                debug!(translation = %text, "Dropping multi-word machine candidate");
            }
            Some(text) => candidates.push(Candidate::machine(text)),
            None => {}
        }

        let mut context = AlignmentContext::new(word, request.sentence.as_str(), source, target);
        context.set_translation(translated_sentence);

        let mut session = LookupSession::new(context, candidates);
        if session.candidates().is_empty() {
            info!(word, "No candidates found");
            return Ok(session);
        }
        session.start()?;
        Ok(session)
    }

    /// Translate within the configured bound; `None` when unavailable
    async fn translate_bounded(&self, text: &str, source: &str, target: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        let timeout = self.config.translation_timeout();
        let request = self.translator.translate(text, source, target);
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(translated)) => {
                let translated = translated.trim();
                (!translated.is_empty()).then(|| translated.to_string())
            }
            Ok(Err(e)) => {
                warn!(
                    provider = self.translator.provider_name(),
                    error = %e,
                    "Machine translation failed"
                );
                None
            }
            Err(_) => {
                warn!(
                    provider = self.translator.provider_name(),
                    timeout_ms = self.config.translation_timeout_ms,
                    "Machine translation timed out"
                );
                None
            }
        }
    }
}

impl std::fmt::Debug for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lookup")
            .field("dictionary", &self.dictionary.provider_name())
            .field("translator", &self.translator.provider_name())
            .field("config", &self.config)
            .finish()
    }
}
