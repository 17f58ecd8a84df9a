//! Dynamic-programming matrix fill shared by both alignment modes.
//!
//! The recurrence and the diagonal > up > left tie-break live here once;
//! the modes differ only in how the boundary is seeded, how a cell's best
//! candidate is clamped, and where the traceback begins. Those three
//! decisions are supplied through [`FillPolicy`].

use log::debug;

use crate::matrix::DpMatrix;
use crate::scoring::{Position, Score, ScoringScheme};
use crate::traceback::Move;

/// Score and move recorded for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub score: Score,
    pub mv: Move,
}

impl Cell {
    pub fn new(score: Score, mv: Move) -> Self {
        Self { score, mv }
    }
}

pub trait FillPolicy {
    /// Cell `(i, 0)` for `i > 0`.
    fn column_boundary(&self, i: usize, gap: Score) -> Cell;

    /// Cell `(0, j)` for `j > 0`.
    fn row_boundary(&self, j: usize, gap: Score) -> Cell;

    /// Applied to the tie-broken best of the three candidates.
    fn clamp(&self, best: Cell) -> Cell;

    /// Cell the traceback walks back from, and the reported score.
    fn traceback_start(&self, filled: &FilledMatrices) -> (Position, Score);
}

/// Needleman-Wunsch: cumulative gap boundary, no clamp, ends at `(n, m)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalPolicy;

impl FillPolicy for GlobalPolicy {
    fn column_boundary(&self, i: usize, gap: Score) -> Cell {
        Cell::new(i as Score * gap, Move::Up)
    }

    fn row_boundary(&self, j: usize, gap: Score) -> Cell {
        Cell::new(j as Score * gap, Move::Left)
    }

    fn clamp(&self, best: Cell) -> Cell {
        best
    }

    fn traceback_start(&self, filled: &FilledMatrices) -> (Position, Score) {
        let end = Position::new(filled.rows() - 1, filled.cols() - 1);
        (end, filled.scores[(end.i, end.j)])
    }
}

/// Smith-Waterman: zero boundary, scores floored at zero, ends at the
/// first maximum in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPolicy;

impl FillPolicy for LocalPolicy {
    fn column_boundary(&self, _i: usize, _gap: Score) -> Cell {
        Cell::new(0, Move::Stop)
    }

    fn row_boundary(&self, _j: usize, _gap: Score) -> Cell {
        Cell::new(0, Move::Stop)
    }

    // A zero cell is always a STOP, even when a candidate was exactly zero.
    fn clamp(&self, best: Cell) -> Cell {
        if best.score <= 0 {
            Cell::new(0, Move::Stop)
        } else {
            best
        }
    }

    fn traceback_start(&self, filled: &FilledMatrices) -> (Position, Score) {
        (filled.peak, filled.peak_score)
    }
}

#[derive(Debug, Clone)]
pub struct FilledMatrices {
    pub scores: DpMatrix<Score>,
    pub moves: DpMatrix<Move>,
    /// First cell (row-major) holding the maximum interior score, or the
    /// origin when nothing exceeds zero.
    pub peak: Position,
    pub peak_score: Score,
}

impl FilledMatrices {
    pub fn rows(&self) -> usize {
        self.scores.rows()
    }

    pub fn cols(&self) -> usize {
        self.scores.cols()
    }
}

/// Picks the best of the three candidates. Diagonal wins any tie, up wins
/// a tie with left.
pub fn choose(diagonal: Score, up: Score, left: Score) -> Cell {
    if diagonal >= up && diagonal >= left {
        Cell::new(diagonal, Move::Diagonal)
    } else if up >= left {
        Cell::new(up, Move::Up)
    } else {
        Cell::new(left, Move::Left)
    }
}

pub fn fill_matrices<P: FillPolicy>(
    seq1: &[u8],
    seq2: &[u8],
    scoring: &ScoringScheme,
    policy: &P,
) -> FilledMatrices {
    let rows = seq1.len() + 1;
    let cols = seq2.len() + 1;
    let gap = scoring.gap_penalty();

    let mut scores = DpMatrix::new(rows, cols, 0 as Score);
    let mut moves = DpMatrix::new(rows, cols, Move::Stop);

    for i in 1..rows {
        let cell = policy.column_boundary(i, gap);
        scores[(i, 0)] = cell.score;
        moves[(i, 0)] = cell.mv;
    }
    for j in 1..cols {
        let cell = policy.row_boundary(j, gap);
        scores[(0, j)] = cell.score;
        moves[(0, j)] = cell.mv;
    }

    let mut peak = Position::new(0, 0);
    let mut peak_score = scores[(0, 0)];

    for i in 1..rows {
        let a = seq1[i - 1];
        for j in 1..cols {
            let diagonal = scores[(i - 1, j - 1)] + scoring.substitution(a, seq2[j - 1]);
            let up = scores[(i - 1, j)] + gap;
            let left = scores[(i, j - 1)] + gap;

            let cell = policy.clamp(choose(diagonal, up, left));
            scores[(i, j)] = cell.score;
            moves[(i, j)] = cell.mv;

            if cell.score > peak_score {
                peak_score = cell.score;
                peak = Position::new(i, j);
            }
        }
    }

    debug!(
        "filled {}x{} matrices, peak {} at ({}, {})",
        rows, cols, peak_score, peak.i, peak.j
    );

    FilledMatrices {
        scores,
        moves,
        peak,
        peak_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tie_break_prefers_diagonal_then_up() {
        assert_eq!(choose(1, 1, 1).mv, Move::Diagonal);
        assert_eq!(choose(0, 1, 1).mv, Move::Up);
        assert_eq!(choose(0, 1, 2).mv, Move::Left);
        assert_eq!(choose(3, 2, 3).mv, Move::Diagonal);
        assert_eq!(choose(-5, -2, -2), Cell::new(-2, Move::Up));
    }

    #[test]
    fn global_boundary_accumulates_gaps() {
        let scoring = ScoringScheme::new(1, -1, -2);
        let filled = fill_matrices(b"ACG", b"AC", &scoring, &GlobalPolicy);
        assert_eq!(filled.scores.dimensions(), (4, 3));
        for i in 0..4 {
            assert_eq!(filled.scores[(i, 0)], -2 * i as Score);
        }
        for j in 0..3 {
            assert_eq!(filled.scores[(0, j)], -2 * j as Score);
        }
        assert_eq!(filled.moves[(0, 0)], Move::Stop);
        assert_eq!(filled.moves[(2, 0)], Move::Up);
        assert_eq!(filled.moves[(0, 2)], Move::Left);
    }

    #[test]
    fn local_clamps_to_zero_with_stop() {
        let scoring = ScoringScheme::new(1, -1, -1);
        let filled = fill_matrices(b"AC", b"GT", &scoring, &LocalPolicy);
        assert!(filled.scores.as_slice().iter().all(|&s| s == 0));
        assert!(filled.moves.as_slice().iter().all(|&m| m == Move::Stop));
        assert_eq!(filled.peak, Position::new(0, 0));
        assert_eq!(filled.peak_score, 0);
    }

    #[test]
    fn local_zero_candidate_still_records_stop() {
        // Cell (2, 2): diagonal = 1 + -1 = 0, clamps to STOP not DIAGONAL.
        let scoring = ScoringScheme::new(1, -1, -1);
        let filled = fill_matrices(b"AC", b"AG", &scoring, &LocalPolicy);
        assert_eq!(filled.scores[(2, 2)], 0);
        assert_eq!(filled.moves[(2, 2)], Move::Stop);
    }

    #[test]
    fn local_peak_keeps_first_maximum() {
        let scoring = ScoringScheme::new(1, -1, -1);
        let filled = fill_matrices(b"A", b"AA", &scoring, &LocalPolicy);
        assert_eq!(filled.peak_score, 1);
        assert_eq!(filled.peak, Position::new(1, 1));
    }
}
