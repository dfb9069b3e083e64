//! Core data structures shared by the ranker, the locator and the providers

use serde::{Deserialize, Serialize};

/// Where a candidate translation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    Dictionary,
    MachineTranslation,
}

impl std::fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateSource::Dictionary => write!(f, "dictionary"),
            CandidateSource::MachineTranslation => write!(f, "machine-translation"),
        }
    }
}

/// A proposed translation for the selected word
///
/// Candidates are produced by a dictionary or a translation provider and are not
/// modified afterwards. Dictionary candidates arrive in their native dictionary
/// order, which is the tie-break for equal scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Text shown to the reader
    pub text: String,
    pub source: CandidateSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    /// Short contextual gloss, e.g. "finance" for bank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Candidate {
    pub fn new(text: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            text: text.into(),
            source,
            part_of_speech: None,
            context: None,
        }
    }

    /// Candidate coming from an offline dictionary
    pub fn dictionary(text: impl Into<String>) -> Self {
        Self::new(text, CandidateSource::Dictionary)
    }

    /// Candidate coming from a machine translation of the word alone
    pub fn machine(text: impl Into<String>) -> Self {
        Self::new(text, CandidateSource::MachineTranslation)
    }

    pub fn with_part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.part_of_speech = Some(part_of_speech.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn is_dictionary(&self) -> bool {
        self.source == CandidateSource::Dictionary
    }
}

/// A word of the translated sentence that a candidate was aligned with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedWord {
    /// Index in the tokenized translated sentence
    pub index: usize,
    /// Raw token text as it appears in the sentence
    pub text: String,
    /// Byte offset of the token start in the translated sentence
    pub start: usize,
    /// Byte offset one past the token end
    pub end: usize,
}

/// Scores computed for one candidate text at one expected position
///
/// All scores are in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Best fuzzy similarity against any translated word
    pub similarity: f64,
    /// Proximity of that word to the expected position
    pub position_score: f64,
    /// `0.8 * similarity + 0.2 * position_score`
    pub final_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched: Option<MatchedWord>,
}

/// A candidate with its scores, as produced by the ranker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    #[serde(flatten)]
    pub score: CandidateScore,
}

impl ScoredCandidate {
    /// Candidate that was never scored (translated sentence unavailable)
    pub fn unscored(candidate: Candidate) -> Self {
        Self {
            candidate,
            score: CandidateScore::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.candidate.text
    }

    pub fn final_score(&self) -> f64 {
        self.score.final_score
    }
}
