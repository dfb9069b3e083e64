//! Dictionary lookup
//!
//! Dictionaries are external collaborators reached through [`DictionaryProvider`].
//! A lookup tries an ordered list of strategies through [`DictionaryPipeline`]
//! and stops at the first one that produces candidates.

pub mod entry;
pub mod memory;
pub mod pipeline;

pub use entry::{DictionaryEntry, Direction, split_definition};
pub use memory::InMemoryDictionary;
pub use pipeline::{DictionaryPipeline, LookupStrategy, PipelineHit};

use crate::error::AlignResult;
use async_trait::async_trait;

/// How the query word is compared with stored lemmas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Lemma as written, after trimming
    Exact,
    /// Normalized word against normalized lemma
    Folded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryQuery {
    pub word: String,
    pub source_language: String,
    pub target_language: String,
    pub direction: Direction,
    pub mode: MatchMode,
}

/// Source of dictionary entries
///
/// Implementations return entries in their native rank order, best first. An
/// empty result is not an error.
#[async_trait]
pub trait DictionaryProvider: Send + Sync {
    async fn lookup(&self, query: &DictionaryQuery) -> AlignResult<Vec<DictionaryEntry>>;

    /// Name used in logs
    fn provider_name(&self) -> &str;
}
