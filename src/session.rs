//! One reader interaction: rank once, then cycle and highlight
//!
//! ```text
//! Idle -> Scoring -> Ranked -> Highlighted
//! ```
//!
//! Cycling to another candidate only re-runs the locator. A new translated
//! sentence clears the context caches and re-runs ranking and locating.

use crate::context::AlignmentContext;
use crate::data::{Candidate, MatchedWord, ScoredCandidate};
use crate::error::AlignResult;
use crate::locator::locate;
use crate::ranker::{Ranking, rank};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupState {
    /// Nothing ranked yet
    Idle,
    Scoring,
    /// Ranked, but the displayed candidate has no word to highlight
    Ranked,
    Highlighted,
}

#[derive(Debug)]
pub struct LookupSession {
    context: AlignmentContext,
    candidates: Vec<Candidate>,
    ranking: Option<Ranking>,
    /// Position in `Ranking::cycle_order`
    cursor: usize,
    highlight: Option<MatchedWord>,
    state: LookupState,
}

impl LookupSession {
    pub fn new(context: AlignmentContext, candidates: Vec<Candidate>) -> Self {
        Self {
            context,
            candidates,
            ranking: None,
            cursor: 0,
            highlight: None,
            state: LookupState::Idle,
        }
    }

    pub fn state(&self) -> LookupState {
        self.state
    }

    pub fn context(&self) -> &AlignmentContext {
        &self.context
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn ranking(&self) -> Option<&Ranking> {
        self.ranking.as_ref()
    }

    pub fn highlight(&self) -> Option<&MatchedWord> {
        self.highlight.as_ref()
    }

    /// Candidate currently on display
    pub fn current(&self) -> Option<&ScoredCandidate> {
        let ranking = self.ranking.as_ref()?;
        ranking.cycle_order().get(self.cursor).copied()
    }

    pub fn display_text(&self) -> Option<&str> {
        self.current().map(|c| c.text())
    }

    /// Rank all candidates and highlight the chosen one
    ///
    /// # Errors
    ///
    /// Fails only when the session has no candidates at all.
    pub fn start(&mut self) -> AlignResult<()> {
        self.state = LookupState::Scoring;
        let ranking = match rank(&self.candidates, &mut self.context) {
            Ok(ranking) => ranking,
            Err(e) => {
                self.state = LookupState::Idle;
                return Err(e);
            }
        };
        self.ranking = Some(ranking);
        self.cursor = 0;
        self.state = LookupState::Ranked;
        self.refresh_highlight();
        Ok(())
    }

    /// Move to the next candidate, wrapping around
    ///
    /// Returns `None` until the session has been ranked.
    pub fn cycle_next(&mut self) -> Option<&ScoredCandidate> {
        let len = self.ranking.as_ref()?.cycle_order().len();
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % len;
        self.state = LookupState::Scoring;
        self.refresh_highlight();
        self.current()
    }

    /// A new translated sentence arrived
    ///
    /// Nothing is recomputed when the text did not change.
    pub fn update_translation(&mut self, translated_sentence: Option<String>) -> AlignResult<()> {
        if !self.context.set_translation(translated_sentence) {
            return Ok(());
        }
        if self.state == LookupState::Idle && self.ranking.is_none() {
            return Ok(());
        }
        self.start()
    }

    fn refresh_highlight(&mut self) {
        let chosen = self.current().map(|c| c.text().to_string());
        self.highlight = chosen.and_then(|text| locate(&text, &mut self.context));
        self.state = if self.highlight.is_some() {
            LookupState::Highlighted
        } else {
            LookupState::Ranked
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;

    fn session() -> LookupSession {
        let context = AlignmentContext::new("banco", "Fui al banco a sacar dinero.", "es", "en")
            .with_translation("I went to the bank to withdraw money.");
        LookupSession::new(
            context,
            vec![Candidate::dictionary("bench"), Candidate::dictionary("bank")],
        )
    }

    #[test]
    fn test_starts_idle() {
        let s = session();
        assert_eq!(s.state(), LookupState::Idle);
        assert!(s.ranking().is_none());
        assert!(s.current().is_none());
    }

    #[test]
    fn test_start_ranks_and_highlights() {
        let mut s = session();
        s.start().unwrap();
        assert_eq!(s.state(), LookupState::Highlighted);
        assert_eq!(s.display_text(), Some("bank"));
        assert_eq!(s.highlight().unwrap().index, 4);
    }

    #[test]
    fn test_cycle_relocates_without_reranking() {
        let mut s = session();
        s.start().unwrap();
        let cached = s.context().cached_score_count();

        assert_eq!(s.cycle_next().unwrap().text(), "bench");
        assert_eq!(s.state(), LookupState::Ranked);
        assert!(s.highlight().is_none());
        assert_eq!(s.context().cached_score_count(), cached);

        assert_eq!(s.cycle_next().unwrap().text(), "bank");
        assert_eq!(s.state(), LookupState::Highlighted);
    }

    #[test]
    fn test_cycle_before_start_is_none() {
        let mut s = session();
        assert!(s.cycle_next().is_none());
        assert_eq!(s.state(), LookupState::Idle);
    }

    #[test]
    fn test_update_translation_reranks() {
        let mut s = session();
        s.start().unwrap();
        s.update_translation(Some("I sat on the bench by the river.".to_string()))
            .unwrap();
        assert_eq!(s.display_text(), Some("bench"));
        assert_eq!(s.highlight().unwrap().text, "bench");
    }

    #[test]
    fn test_update_translation_to_unavailable_falls_back() {
        let mut s = session();
        s.start().unwrap();
        s.update_translation(None).unwrap();
        let ranking = s.ranking().unwrap();
        assert!(!ranking.is_scored());
        assert_eq!(s.display_text(), Some("bench"));
        assert_eq!(s.state(), LookupState::Ranked);
    }

    #[test]
    fn test_update_before_start_does_not_rank() {
        let mut s = session();
        s.update_translation(Some("Another sentence".to_string()))
            .unwrap();
        assert_eq!(s.state(), LookupState::Idle);
    }

    #[test]
    fn test_empty_session_stays_idle() {
        let context = AlignmentContext::new("banco", "Fui al banco.", "es", "en");
        let mut s = LookupSession::new(context, Vec::new());
        assert_eq!(s.start().unwrap_err(), AlignError::EmptyCandidates);
        assert_eq!(s.state(), LookupState::Idle);
    }
}
