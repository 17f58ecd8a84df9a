use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scoring::ScoringScheme;
use crate::AlignerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentMode {
    #[default]
    Global, // Needleman-Wunsch
    Local,  // Smith-Waterman
}

impl AlignmentMode {
    pub fn name(&self) -> &'static str {
        match self {
            AlignmentMode::Global => "global",
            AlignmentMode::Local => "local",
        }
    }

    pub fn algorithm(&self) -> &'static str {
        match self {
            AlignmentMode::Global => "Needleman-Wunsch",
            AlignmentMode::Local => "Smith-Waterman",
        }
    }
}

impl fmt::Display for AlignmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlignmentMode {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" | "nw" | "needleman-wunsch" => Ok(AlignmentMode::Global),
            "local" | "sw" | "smith-waterman" => Ok(AlignmentMode::Local),
            other => Err(AlignerError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlignmentParams {
    pub mode: AlignmentMode,
    pub scoring: ScoringScheme,
}

impl AlignmentParams {
    pub fn new(mode: AlignmentMode, scoring: ScoringScheme) -> Self {
        Self { mode, scoring }
    }
}
