//! Contextual translation disambiguation for gloss-align
//!
//! A reader selects a word in a sentence. A dictionary offers several possible
//! translations, and machine translation gives the whole sentence translated. This
//! crate ranks the dictionary candidates by how well each one matches a word at
//! the corresponding position of the translated sentence, and finds the word to
//! highlight.
//!
//! # Workflow Example
//!
//! ```ignore
//! use gloss_align::{AlignConfig, InMemoryDictionary, Lookup, LookupRequest, MockMode, MockTranslator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Providers
//!     let dictionary = InMemoryDictionary::from_json_str(
//!         r#"[{"lemma":"banco","definition":"bench; bank","source_language":"es","target_language":"en"}]"#,
//!     )?;
//!     let translator = MockTranslator::new(MockMode::Echo);
//!
//!     // 2. Look up the selected word
//!     let lookup = Lookup::new(Arc::new(dictionary), Arc::new(translator), AlignConfig::default());
//!     let request = LookupRequest::new("banco", "Fui al banco a sacar dinero.", "es", "en")
//!         .with_translation("I went to the bank to withdraw money.");
//!     let mut session = lookup.run(&request).await?;
//!
//!     // 3. Show the best candidate, then cycle
//!     println!("{:?} {:?}", session.display_text(), session.highlight());
//!     session.cycle_next();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod context;
pub mod data;
pub mod dictionary;
pub mod error;
pub mod locator;
pub mod lookup;
pub mod mt;
pub mod normalize;
pub mod position;
pub mod ranker;
pub mod session;
pub mod similarity;
pub mod tokenizer;


// Re-export main types for convenient access
pub use config::AlignConfig;
pub use context::{AlignmentContext, TranslatedSentence};
pub use data::{Candidate, CandidateScore, CandidateSource, MatchedWord, ScoredCandidate};
pub use dictionary::{
    DictionaryEntry, DictionaryPipeline, DictionaryProvider, Direction, InMemoryDictionary,
    LookupStrategy,
};
pub use error::{AlignError, AlignResult};
pub use locator::locate;
pub use lookup::{Lookup, LookupRequest};
pub use mt::{GoogleTranslateProvider, MachineTranslator, MockMode, MockTranslator};
pub use normalize::normalize;
pub use position::{expected_position, position_score};
pub use ranker::{Ranking, RankingMode, rank};
pub use session::{LookupSession, LookupState};
pub use similarity::similarity;
pub use tokenizer::{Word, tokenize};
