use std::fmt::Write as _;

use log::debug;
use serde::Serialize;

use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::fill::{fill_matrices, FillPolicy, GlobalPolicy, LocalPolicy};
use crate::matrix::DpMatrix;
use crate::scoring::{identity, AlignmentStats, Position, Score, ScoringScheme};
use crate::GAP_CHAR;

/// Recurrence branch that produced a cell's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Move {
    Diagonal,
    Up,
    Left,
    Stop,
}

impl Move {
    pub fn symbol(&self) -> char {
        match self {
            Move::Diagonal => '\\',
            Move::Up => '^',
            Move::Left => '<',
            Move::Stop => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TracebackOperation {
    Match,
    Mismatch,
    Insertion,
    Deletion,
}

impl TracebackOperation {
    fn cigar_code(&self) -> char {
        match self {
            TracebackOperation::Match => '=',
            TracebackOperation::Mismatch => 'X',
            TracebackOperation::Insertion => 'I',
            TracebackOperation::Deletion => 'D',
        }
    }
}

/// Everything one alignment run produced. Built once, then only read.
#[derive(Debug, Clone, Serialize)]
pub struct AlignmentResult {
    mode: AlignmentMode,
    seq1: String,
    seq2: String,
    scoring: ScoringScheme,
    aligned_seq1: String,
    aligned_seq2: String,
    score: Score,
    identity: f64,
    matrix: DpMatrix<Score>,
    trace: DpMatrix<Move>,
    path: Vec<Position>,
}

impl AlignmentResult {
    pub fn mode(&self) -> AlignmentMode {
        self.mode
    }

    pub fn seq1(&self) -> &str {
        &self.seq1
    }

    pub fn seq2(&self) -> &str {
        &self.seq2
    }

    pub fn scoring(&self) -> &ScoringScheme {
        &self.scoring
    }

    pub fn aligned_seq1(&self) -> &str {
        &self.aligned_seq1
    }

    pub fn aligned_seq2(&self) -> &str {
        &self.aligned_seq2
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Percent identity in `[0, 100]`.
    pub fn identity(&self) -> f64 {
        self.identity
    }

    pub fn matrix(&self) -> &DpMatrix<Score> {
        &self.matrix
    }

    pub fn trace(&self) -> &DpMatrix<Move> {
        &self.trace
    }

    /// Visited cells in start-to-end order, both endpoints included.
    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn alignment_length(&self) -> usize {
        self.aligned_seq1.len()
    }

    pub fn start(&self) -> Position {
        self.path.first().copied().unwrap_or_default()
    }

    pub fn end(&self) -> Position {
        self.path.last().copied().unwrap_or_default()
    }

    pub fn stats(&self) -> AlignmentStats {
        AlignmentStats::from_aligned(&self.aligned_seq1, &self.aligned_seq2)
    }

    pub fn operations(&self) -> Vec<TracebackOperation> {
        self.aligned_seq1
            .bytes()
            .zip(self.aligned_seq2.bytes())
            .map(|(a, b)| {
                if a == GAP_CHAR {
                    TracebackOperation::Insertion
                } else if b == GAP_CHAR {
                    TracebackOperation::Deletion
                } else if a == b {
                    TracebackOperation::Match
                } else {
                    TracebackOperation::Mismatch
                }
            })
            .collect()
    }

    /// Run-length encoded operations, `=`/`X` for aligned pairs.
    pub fn cigar(&self) -> String {
        let mut cigar = String::new();
        let ops = self.operations();
        for run in ops.chunk_by(|a, b| a == b) {
            let _ = write!(cigar, "{}{}", run.len(), run[0].cigar_code());
        }
        cigar
    }

    /// `|` for identical columns, `.` for mismatches, blank for gaps.
    pub fn match_line(&self) -> String {
        self.operations()
            .iter()
            .map(|op| match op {
                TracebackOperation::Match => '|',
                TracebackOperation::Mismatch => '.',
                _ => ' ',
            })
            .collect()
    }
}

struct Traceback {
    aligned_seq1: String,
    aligned_seq2: String,
    path: Vec<Position>,
}

/// Follows recorded moves from `start` until a STOP cell, which is kept as
/// the last visited cell. Output is returned in start-to-end order.
fn trace_back(seq1: &[u8], seq2: &[u8], moves: &DpMatrix<Move>, start: Position) -> Traceback {
    let mut rev1 = Vec::new();
    let mut rev2 = Vec::new();
    let mut path = Vec::new();
    let (mut i, mut j) = (start.i, start.j);

    loop {
        path.push(Position::new(i, j));
        match moves[(i, j)] {
            Move::Stop => break,
            Move::Diagonal => {
                rev1.push(seq1[i - 1]);
                rev2.push(seq2[j - 1]);
                i -= 1;
                j -= 1;
            }
            Move::Up => {
                rev1.push(seq1[i - 1]);
                rev2.push(GAP_CHAR);
                i -= 1;
            }
            Move::Left => {
                rev1.push(GAP_CHAR);
                rev2.push(seq2[j - 1]);
                j -= 1;
            }
        }
    }

    path.reverse();
    Traceback {
        aligned_seq1: rev1.iter().rev().map(|&b| char::from(b)).collect(),
        aligned_seq2: rev2.iter().rev().map(|&b| char::from(b)).collect(),
        path,
    }
}

fn run<P: FillPolicy>(
    mode: AlignmentMode,
    seq1: &str,
    seq2: &str,
    scoring: &ScoringScheme,
    policy: &P,
) -> AlignmentResult {
    let filled = fill_matrices(seq1.as_bytes(), seq2.as_bytes(), scoring, policy);
    let (start, score) = policy.traceback_start(&filled);
    let traceback = trace_back(seq1.as_bytes(), seq2.as_bytes(), &filled.moves, start);
    let identity = identity(&traceback.aligned_seq1, &traceback.aligned_seq2);

    debug!(
        "{} traceback from ({}, {}) visited {} cells",
        mode,
        start.i,
        start.j,
        traceback.path.len()
    );

    AlignmentResult {
        mode,
        seq1: seq1.to_string(),
        seq2: seq2.to_string(),
        scoring: *scoring,
        aligned_seq1: traceback.aligned_seq1,
        aligned_seq2: traceback.aligned_seq2,
        score,
        identity,
        matrix: filled.scores,
        trace: filled.moves,
        path: traceback.path,
    }
}

/// Needleman-Wunsch alignment over the full length of both sequences.
pub fn global_alignment(seq1: &str, seq2: &str, scoring: &ScoringScheme) -> AlignmentResult {
    run(AlignmentMode::Global, seq1, seq2, scoring, &GlobalPolicy)
}

/// Smith-Waterman alignment of the best-scoring pair of substrings.
pub fn local_alignment(seq1: &str, seq2: &str, scoring: &ScoringScheme) -> AlignmentResult {
    run(AlignmentMode::Local, seq1, seq2, scoring, &LocalPolicy)
}

pub fn align(seq1: &str, seq2: &str, params: &AlignmentParams) -> AlignmentResult {
    match params.mode {
        AlignmentMode::Global => global_alignment(seq1, seq2, &params.scoring),
        AlignmentMode::Local => local_alignment(seq1, seq2, &params.scoring),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> ScoringScheme {
        ScoringScheme::new(1, -1, -1)
    }

    #[test]
    fn global_identical() {
        let r = global_alignment("AC", "AC", &unit());
        assert_eq!(r.aligned_seq1(), "AC");
        assert_eq!(r.aligned_seq2(), "AC");
        assert_eq!(r.score(), 2);
        assert_eq!(r.identity(), 100.0);
        assert_eq!(
            r.path(),
            &[Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn global_disjoint_prefers_diagonal() {
        let r = global_alignment("AC", "GT", &unit());
        assert_eq!(r.aligned_seq1(), "AC");
        assert_eq!(r.aligned_seq2(), "GT");
        assert_eq!(r.score(), -2);
        assert_eq!(r.identity(), 0.0);
        assert_eq!(r.cigar(), "2X");
    }

    #[test]
    fn local_disjoint_is_empty() {
        let r = local_alignment("AC", "GT", &unit());
        assert_eq!(r.score(), 0);
        assert_eq!(r.aligned_seq1(), "");
        assert_eq!(r.aligned_seq2(), "");
        assert_eq!(r.identity(), 0.0);
        assert_eq!(r.path(), &[Position::new(0, 0)]);
    }

    #[test]
    fn global_prefix_gets_trailing_gaps() {
        let r = global_alignment("ACGT", "AC", &unit());
        assert_eq!(r.aligned_seq1(), "ACGT");
        assert_eq!(r.aligned_seq2(), "AC--");
        assert_eq!(r.score(), 0);
        assert_eq!(r.identity(), 50.0);
        assert_eq!(r.cigar(), "2=2D");
        assert_eq!(r.match_line(), "||  ");
        assert_eq!(r.start(), Position::new(0, 0));
        assert_eq!(r.end(), Position::new(4, 2));
    }

    #[test]
    fn local_finds_embedded_region() {
        let r = local_alignment("TTACGTT", "GGACGGG", &unit());
        assert_eq!(r.score(), 3);
        assert_eq!(r.aligned_seq1(), "ACG");
        assert_eq!(r.aligned_seq2(), "ACG");
        assert_eq!(r.start(), Position::new(2, 2));
        assert_eq!(r.end(), Position::new(5, 5));
        assert_eq!(r.trace()[(2, 2)], Move::Stop);
        assert_eq!(r.matrix()[(2, 2)], 0);
    }

    #[test]
    fn insertion_in_second_sequence() {
        let r = global_alignment("AT", "AGT", &unit());
        assert_eq!(r.aligned_seq1(), "A-T");
        assert_eq!(r.aligned_seq2(), "AGT");
        assert_eq!(r.score(), 1);
        assert_eq!(
            r.operations(),
            vec![
                TracebackOperation::Match,
                TracebackOperation::Insertion,
                TracebackOperation::Match
            ]
        );
    }

    #[test]
    fn align_dispatches_on_mode() {
        let params = AlignmentParams::new(AlignmentMode::Local, unit());
        let r = align("AC", "GT", &params);
        assert_eq!(r.mode(), AlignmentMode::Local);
        assert_eq!(r.score(), 0);
    }
}
