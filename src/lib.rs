use std::time::Instant;

use log::{debug, info};
use thiserror::Error;

pub mod alignment_mode;
pub mod config;
pub mod export;
pub mod fill;
pub mod matrix;
pub mod scoring;
pub mod sequence;
pub mod traceback;

pub use crate::alignment_mode::{AlignmentMode, AlignmentParams};
pub use crate::config::AlignerConfig;
pub use crate::export::ExportFormat;
pub use crate::matrix::DpMatrix;
pub use crate::scoring::{identity, AlignmentStats, Position, Score, ScoringScheme};
pub use crate::sequence::{normalize, Sequence};
pub use crate::traceback::{
    align, global_alignment, local_alignment, AlignmentResult, Move, TracebackOperation,
};

// Default scoring parameters
pub const DEFAULT_MATCH: i32 = 1;
pub const DEFAULT_MISMATCH: i32 = -1;
pub const DEFAULT_GAP: i32 = -1;

/// Gap marker in aligned strings.
pub const GAP_CHAR: u8 = b'-';

#[derive(Debug, Error)]
pub enum AlignerError {
    #[error("both sequences must not be empty")]
    EmptySequence,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown alignment mode: {0}")]
    UnknownMode(String),
    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, AlignerError>;

/// Rejects a pair where either side normalised to nothing.
pub fn validate_pair(seq1: &Sequence, seq2: &Sequence) -> Result<()> {
    if seq1.is_empty() || seq2.is_empty() {
        return Err(AlignerError::EmptySequence);
    }
    Ok(())
}

/// Caller-facing entry point: validates input, then runs the engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseAligner {
    params: AlignmentParams,
}

impl PairwiseAligner {
    pub fn new(params: AlignmentParams) -> Self {
        Self { params }
    }

    pub fn from_config(config: &AlignerConfig) -> Self {
        Self::new(config.params())
    }

    pub fn with_alignment_mode(mut self, mode: AlignmentMode) -> Self {
        self.params.mode = mode;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringScheme) -> Self {
        self.params.scoring = scoring;
        self
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }

    pub fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Result<AlignmentResult> {
        validate_pair(seq1, seq2)?;

        debug!(
            "Aligning {} x {} residues in {} mode",
            seq1.len(),
            seq2.len(),
            self.params.mode
        );
        let start_time = Instant::now();
        let result = align(seq1.as_str(), seq2.as_str(), &self.params);

        info!(
            "{} alignment finished in {:.3} ms: score={} identity={:.2}%",
            self.params.mode,
            start_time.elapsed().as_secs_f64() * 1000.0,
            result.score(),
            result.identity()
        );
        Ok(result)
    }

    /// Normalises both inputs before aligning them.
    pub fn align_raw(&self, raw1: &str, raw2: &str) -> Result<AlignmentResult> {
        self.align(&Sequence::from_raw(raw1), &Sequence::from_raw(raw2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_input() {
        let aligner = PairwiseAligner::default();
        let err = aligner.align_raw(">header only\n", "ACGT").unwrap_err();
        assert!(matches!(err, AlignerError::EmptySequence));
        assert_eq!(err.to_string(), "both sequences must not be empty");
        assert!(aligner.align_raw("ACGT", "123").is_err());
    }

    #[test]
    fn builder_overrides_params() {
        let aligner = PairwiseAligner::default()
            .with_alignment_mode(AlignmentMode::Local)
            .with_scoring(ScoringScheme::new(2, -1, -2));
        assert_eq!(aligner.params().mode, AlignmentMode::Local);
        assert_eq!(aligner.params().scoring.match_score, 2);

        let result = aligner.align_raw("ttacgtt", "ggacggg").unwrap();
        assert_eq!(result.aligned_seq1(), "ACG");
        assert_eq!(result.score(), 6);
    }

    #[test]
    fn normalises_before_aligning() {
        let result = PairwiseAligner::default()
            .align_raw(">s1\nac\n", "a-c")
            .unwrap();
        assert_eq!(result.seq1(), "AC");
        assert_eq!(result.seq2(), "AC");
        assert_eq!(result.score(), 2);
    }
}
