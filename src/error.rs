/// Error types for the alignment engine and its providers
///
/// Only contract violations and provider failures are errors. Missing alignments,
/// a pending sentence translation and unknown characters are ordinary outcomes and
/// are returned as `None` or as an unscored ranking instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// `rank` was called without a single candidate
    EmptyCandidates,
    /// A language tag could not be parsed
    InvalidLanguage(String),
    /// The machine translation provider rejected or failed the request
    TranslationError(String),
    /// Transport failure talking to a provider
    NetworkError(String),
    /// Missing or malformed configuration
    ConfigError(String),
    /// The dictionary provider failed or its data is malformed
    DictionaryError(String),
}

impl std::fmt::Display for AlignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignError::EmptyCandidates => write!(f, "Cannot rank an empty candidate list"),
            AlignError::InvalidLanguage(msg) => write!(f, "Invalid language: {}", msg),
            AlignError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            AlignError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AlignError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AlignError::DictionaryError(msg) => write!(f, "Dictionary error: {}", msg),
        }
    }
}

impl std::error::Error for AlignError {}

impl From<reqwest::Error> for AlignError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AlignError::NetworkError(format!("Request timed out: {}", err))
        } else {
            AlignError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AlignError {
    fn from(err: serde_json::Error) -> Self {
        AlignError::DictionaryError(format!("Invalid JSON: {}", err))
    }
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
