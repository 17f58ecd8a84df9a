use serde::{Deserialize, Serialize};

use crate::{DEFAULT_GAP, DEFAULT_MATCH, DEFAULT_MISMATCH, GAP_CHAR};

/// Accumulator type for matrix cells. Wide enough that sequences of tens of
/// thousands of residues times any `i32` penalty cannot overflow.
pub type Score = i64;

/// Uniform scalar scoring: one value for identical residues, one for
/// differing residues and one per gap column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringScheme {
    #[serde(rename = "match")]
    pub match_score: i32,
    pub mismatch: i32,
    pub gap: i32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            match_score: DEFAULT_MATCH,
            mismatch: DEFAULT_MISMATCH,
            gap: DEFAULT_GAP,
        }
    }
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch: i32, gap: i32) -> Self {
        Self {
            match_score,
            mismatch,
            gap,
        }
    }

    pub fn substitution(&self, a: u8, b: u8) -> Score {
        if a == b {
            Score::from(self.match_score)
        } else {
            Score::from(self.mismatch)
        }
    }

    pub fn gap_penalty(&self) -> Score {
        Score::from(self.gap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub i: usize,
    pub j: usize,
}

impl Position {
    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }
}

impl From<(usize, usize)> for Position {
    fn from((i, j): (usize, usize)) -> Self {
        Self { i, j }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AlignmentStats {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
}

impl AlignmentStats {
    /// Column-by-column tally of two equal-length aligned strings.
    pub fn from_aligned(aligned1: &str, aligned2: &str) -> Self {
        aligned1
            .bytes()
            .zip(aligned2.bytes())
            .fold(Self::default(), |mut acc, (a, b)| {
                if a == GAP_CHAR || b == GAP_CHAR {
                    acc.gaps += 1;
                } else if a == b {
                    acc.matches += 1;
                } else {
                    acc.mismatches += 1;
                }
                acc
            })
    }

    pub fn length(&self) -> usize {
        self.matches + self.mismatches + self.gaps
    }
}

/// Percentage of alignment columns holding the same non-gap residue in both
/// rows. Zero for an empty alignment.
pub fn identity(aligned1: &str, aligned2: &str) -> f64 {
    let length = aligned1.len();
    if length == 0 {
        return 0.0;
    }
    let matches = aligned1
        .bytes()
        .zip(aligned2.bytes())
        .filter(|&(a, b)| a == b && a != GAP_CHAR)
        .count();
    100.0 * matches as f64 / length as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring() {
        let scoring = ScoringScheme::default();
        assert_eq!(scoring.match_score, 1);
        assert_eq!(scoring.mismatch, -1);
        assert_eq!(scoring.gap, -1);
    }

    #[test]
    fn test_substitution() {
        let scoring = ScoringScheme::new(5, -4, -2);
        assert_eq!(scoring.substitution(b'A', b'A'), 5);
        assert_eq!(scoring.substitution(b'A', b'C'), -4);
        assert_eq!(scoring.gap_penalty(), -2);
    }

    #[test]
    fn identity_ignores_gap_pairs() {
        assert_eq!(identity("AC-T", "AC-A"), 50.0);
        assert_eq!(identity("ACGT", "ACGT"), 100.0);
        assert_eq!(identity("", ""), 0.0);
    }

    #[test]
    fn stats_tally_columns() {
        let stats = AlignmentStats::from_aligned("ACG-T", "AGGTT");
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.gaps, 1);
        assert_eq!(stats.length(), 5);
    }
}
