//! Ordered dictionary lookup strategies
//!
//! A word is looked up as typed first, then folded, then through reverse-direction
//! entries. The first strategy that yields a candidate wins.

use crate::config::AlignConfig;
use crate::data::Candidate;
use crate::dictionary::{
    DictionaryEntry, DictionaryProvider, DictionaryQuery, Direction, MatchMode,
};
use crate::normalize::normalize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    Exact,
    Folded,
    Reverse,
    ReverseFolded,
}

impl LookupStrategy {
    pub const ALL: [LookupStrategy; 4] = [
        LookupStrategy::Exact,
        LookupStrategy::Folded,
        LookupStrategy::Reverse,
        LookupStrategy::ReverseFolded,
    ];

    pub fn direction(self) -> Direction {
        match self {
            LookupStrategy::Exact | LookupStrategy::Folded => Direction::Forward,
            LookupStrategy::Reverse | LookupStrategy::ReverseFolded => Direction::Reverse,
        }
    }

    pub fn mode(self) -> MatchMode {
        match self {
            LookupStrategy::Exact | LookupStrategy::Reverse => MatchMode::Exact,
            LookupStrategy::Folded | LookupStrategy::ReverseFolded => MatchMode::Folded,
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LookupStrategy::Exact => "exact",
            LookupStrategy::Folded => "folded",
            LookupStrategy::Reverse => "reverse",
            LookupStrategy::ReverseFolded => "reverse-folded",
        };
        write!(f, "{}", name)
    }
}

/// Candidates found by the first successful strategy
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineHit {
    pub strategy: LookupStrategy,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone)]
pub struct DictionaryPipeline {
    strategies: Vec<LookupStrategy>,
    max_candidates: usize,
}

impl DictionaryPipeline {
    pub fn new(config: &AlignConfig) -> Self {
        let strategies = LookupStrategy::ALL
            .into_iter()
            .filter(|s| config.enable_reverse_lookup || s.direction() == Direction::Forward)
            .collect();
        Self {
            strategies,
            max_candidates: config.max_definition_candidates,
        }
    }

    pub fn strategies(&self) -> &[LookupStrategy] {
        &self.strategies
    }

    /// Run the strategies in order and stop at the first that yields candidates
    ///
    /// Candidates from several entries are merged in entry order, dropping
    /// repeats, and truncated to the configured maximum. A failing strategy is
    /// logged and skipped.
    pub async fn lookup(
        &self,
        provider: &dyn DictionaryProvider,
        word: &str,
        source_language: &str,
        target_language: &str,
    ) -> Option<PipelineHit> {
        if word.trim().is_empty() || self.max_candidates == 0 {
            return None;
        }

        for &strategy in &self.strategies {
            // A folded query for an already folded word repeats the exact one
            if strategy.mode() == MatchMode::Folded && normalize(word) == word.trim() {
                continue;
            }

            let query = DictionaryQuery {
                word: word.to_string(),
                source_language: source_language.to_string(),
                target_language: target_language.to_string(),
                direction: strategy.direction(),
                mode: strategy.mode(),
            };

            let entries = match provider.lookup(&query).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        provider = provider.provider_name(),
                        %strategy,
                        error = %e,
                        "Dictionary lookup failed"
                    );
                    continue;
                }
            };

            let candidates = self.collect_candidates(&entries);
            if !candidates.is_empty() {
                debug!(%strategy, count = candidates.len(), "Dictionary candidates found");
                return Some(PipelineHit {
                    strategy,
                    candidates,
                });
            }
        }

        debug!(word, "No dictionary candidates");
        None
    }

    fn collect_candidates(&self, entries: &[DictionaryEntry]) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        for entry in entries {
            for candidate in entry.candidates(self.max_candidates) {
                if candidates.len() >= self.max_candidates {
                    return candidates;
                }
                if seen.insert(normalize(&candidate.text)) {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }
}
