//! Candidate ranking against the translated sentence
//!
//! Every candidate is compared with every word of the translated sentence. The
//! best fuzzy similarity and the distance of that word from the expected
//! position combine into the final score:
//!
//! ```text
//! final = 0.8 * similarity + 0.2 * position_score
//! ```
//!
//! Dictionary candidates are sorted by final score with a stable sort, so equal
//! scores keep the dictionary's own order. A single-word machine translation of
//! the selected word is scored the same way and only takes over the display
//! when it beats every dictionary candidate without merely repeating one of them.

use crate::context::AlignmentContext;
use crate::data::{Candidate, CandidateScore, MatchedWord, ScoredCandidate};
use crate::error::{AlignError, AlignResult};
use crate::normalize::normalize;
use crate::position::position_score;
use crate::similarity::similarity;
use crate::tokenizer::Word;
use serde::Serialize;
use tracing::debug;

/// Weight of the fuzzy similarity in the final score
pub const SIMILARITY_WEIGHT: f64 = 0.8;

/// Weight of the position proximity in the final score
pub const POSITION_WEIGHT: f64 = 0.2;

/// Whether the ranking used the translated sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    Scored,
    /// Translation was unavailable, candidates are in their original order
    Unscored,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub mode: RankingMode,
    /// Dictionary candidates, best first
    pub candidates: Vec<ScoredCandidate>,
    /// Machine translation of the selected word alone, if any
    pub machine: Option<ScoredCandidate>,
    pub prefer_machine_translation: bool,
}

impl Ranking {
    pub fn is_scored(&self) -> bool {
        self.mode == RankingMode::Scored
    }

    /// Candidate to display first
    pub fn chosen(&self) -> Option<&ScoredCandidate> {
        if self.prefer_machine_translation {
            self.machine.as_ref()
        } else {
            self.candidates.first().or(self.machine.as_ref())
        }
    }

    pub fn display_text(&self) -> Option<&str> {
        self.chosen().map(|c| c.text())
    }

    /// Order in which candidates are offered when the reader cycles
    ///
    /// Starts with the chosen candidate. The machine translation is appended
    /// after the dictionary list unless it repeats a dictionary candidate.
    pub fn cycle_order(&self) -> Vec<&ScoredCandidate> {
        let mut order: Vec<&ScoredCandidate> = Vec::with_capacity(self.candidates.len() + 1);
        match &self.machine {
            Some(machine) if self.prefer_machine_translation => {
                order.push(machine);
                order.extend(self.candidates.iter());
            }
            Some(machine) => {
                order.extend(self.candidates.iter());
                let machine_key = normalize(machine.text());
                if !self
                    .candidates
                    .iter()
                    .any(|c| normalize(c.text()) == machine_key)
                {
                    order.push(machine);
                }
            }
            None => order.extend(self.candidates.iter()),
        }
        order
    }
}

/// Rank candidates for the selected word of `context`
///
/// Dictionary candidates are ranked; the first machine-translation candidate
/// becomes [`Ranking::machine`]. Further machine-translation candidates are
/// ignored. Without a translated sentence nothing is scored and the original
/// order is returned.
///
/// # Errors
///
/// [`AlignError::EmptyCandidates`] when `candidates` is empty.
pub fn rank(candidates: &[Candidate], context: &mut AlignmentContext) -> AlignResult<Ranking> {
    if candidates.is_empty() {
        return Err(AlignError::EmptyCandidates);
    }

    let dictionary: Vec<&Candidate> = candidates.iter().filter(|c| c.is_dictionary()).collect();
    let mut machine_candidates = candidates.iter().filter(|c| !c.is_dictionary());
    let machine = machine_candidates.next();
    let ignored = machine_candidates.count();
    if ignored > 0 {
        debug!(ignored, "extra machine translation candidates ignored");
    }

    if !context.has_translation() {
        debug!(
            candidates = candidates.len(),
            "translated sentence unavailable, keeping original order"
        );
        return Ok(Ranking {
            mode: RankingMode::Unscored,
            prefer_machine_translation: dictionary.is_empty() && machine.is_some(),
            candidates: dictionary
                .into_iter()
                .cloned()
                .map(ScoredCandidate::unscored)
                .collect(),
            machine: machine.cloned().map(ScoredCandidate::unscored),
        });
    }

    let expected = context.expected_position();

    let mut ranked: Vec<ScoredCandidate> = dictionary
        .iter()
        .map(|c| score_candidate(c, expected, context))
        .collect();
    // sort_by is stable: equal scores keep dictionary order
    ranked.sort_by(|a, b| b.final_score().total_cmp(&a.final_score()));

    let machine = machine.map(|c| score_candidate(c, expected, context));
    let prefer_machine_translation = match &machine {
        Some(ml) => prefers_machine(ml, &ranked, context),
        None => false,
    };

    Ok(Ranking {
        mode: RankingMode::Scored,
        candidates: ranked,
        machine,
        prefer_machine_translation,
    })
}

/// Dictionary-versus-machine-translation precedence
fn prefers_machine(
    machine: &ScoredCandidate,
    dictionary: &[ScoredCandidate],
    context: &mut AlignmentContext,
) -> bool {
    let Some(best) = dictionary.first() else {
        return true;
    };
    if machine.final_score() <= best.final_score() {
        return false;
    }

    let machine_key = context.normalized(machine.text());
    let confirmed = dictionary
        .iter()
        .any(|d| context.normalized(d.text()) == machine_key);
    debug!(
        machine = machine.text(),
        machine_score = machine.final_score(),
        dictionary_score = best.final_score(),
        confirmed,
        "machine translation outscored dictionary"
    );
    !confirmed
}

/// Score one candidate, reusing the context's memo table
pub fn score_candidate(
    candidate: &Candidate,
    expected: Option<usize>,
    context: &mut AlignmentContext,
) -> ScoredCandidate {
    let key = context.normalized(&candidate.text);
    if let Some(hit) = context.cached_score(&key, expected) {
        return ScoredCandidate {
            candidate: candidate.clone(),
            score: hit.clone(),
        };
    }

    let score = match context.translated_words() {
        Some(words) => compute_score(&key, expected, words),
        None => CandidateScore::default(),
    };
    debug!(
        candidate = candidate.text.as_str(),
        similarity = score.similarity,
        position = score.position_score,
        final_score = score.final_score,
        "scored candidate"
    );
    context.store_score(key, expected, score.clone());

    ScoredCandidate {
        candidate: candidate.clone(),
        score,
    }
}

/// Best match of a normalized candidate among `words`
///
/// The first word reaching the highest similarity is kept.
pub fn compute_score(
    normalized_candidate: &str,
    expected: Option<usize>,
    words: &[Word],
) -> CandidateScore {
    let mut best_similarity = 0.0;
    let mut best_index = None;
    for (index, word) in words.iter().enumerate() {
        let score = similarity(normalized_candidate, word.normalized());
        if score > best_similarity {
            best_similarity = score;
            best_index = Some(index);
        }
    }

    let Some(index) = best_index else {
        return CandidateScore::default();
    };

    let position_score = position_score(expected, index, words.len());
    let word = &words[index];
    CandidateScore {
        similarity: best_similarity,
        position_score,
        final_score: (SIMILARITY_WEIGHT * best_similarity + POSITION_WEIGHT * position_score)
            .clamp(0.0, 1.0),
        matched: Some(MatchedWord {
            index,
            text: word.text.clone(),
            start: word.start,
            end: word.end,
        }),
    }
}
