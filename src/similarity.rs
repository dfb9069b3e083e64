//! Tiered similarity between two normalized words
//!
//! Rules are evaluated in order and the first one that applies decides the score:
//!
//! 1. Exact equality: `1.0`
//! 2. One word contains the other: `shorter / longer * 0.8`
//! 3. Levenshtein similarity of at least `0.7` on words of three or more
//!    characters: `(1 - distance / longest) * 0.6`
//! 4. Anything else: `0.0`
//!
//! Lengths are counted in characters, not bytes.

/// Weight applied to a containment match
pub const SUBSTRING_FACTOR: f64 = 0.8;

/// Minimum raw edit similarity for rule 3
pub const EDIT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Minimum length of the longer word for rule 3
pub const EDIT_MIN_LENGTH: usize = 3;

/// Weight applied to an accepted edit-distance match
pub const EDIT_DISCOUNT: f64 = 0.6;

/// Which rule produced a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Substring,
    EditDistance,
    None,
}

/// Score with the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    pub score: f64,
    pub kind: MatchKind,
}

/// Similarity in `[0, 1]` between two already normalized words
pub fn similarity(candidate: &str, word: &str) -> f64 {
    classify(candidate, word).score
}

/// Similarity together with the rule that matched
pub fn classify(candidate: &str, word: &str) -> Similarity {
    if candidate == word {
        return Similarity {
            score: 1.0,
            kind: MatchKind::Exact,
        };
    }

    let candidate_len = candidate.chars().count();
    let word_len = word.chars().count();
    let longest = candidate_len.max(word_len);

    if candidate_len > 0 && word_len > 0 && (candidate.contains(word) || word.contains(candidate))
    {
        let shortest = candidate_len.min(word_len);
        return Similarity {
            score: shortest as f64 / longest as f64 * SUBSTRING_FACTOR,
            kind: MatchKind::Substring,
        };
    }

    if longest >= EDIT_MIN_LENGTH {
        let distance = levenshtein(candidate, word);
        let ratio = 1.0 - distance as f64 / longest as f64;
        if ratio >= EDIT_SIMILARITY_THRESHOLD {
            return Similarity {
                score: ratio * EDIT_DISCOUNT,
                kind: MatchKind::EditDistance,
            };
        }
    }

    Similarity {
        score: 0.0,
        kind: MatchKind::None,
    }
}

/// Classic Levenshtein distance with unit costs, over characters
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows instead of the full matrix
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
