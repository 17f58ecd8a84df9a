//! Aligner configuration, loaded from `pairwise-align.toml` style files.
//!
//! ```toml
//! mode = "local"
//!
//! [scoring]
//! match = 2
//! mismatch = -1
//! gap = -2
//!
//! [output]
//! format = "csv"
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::alignment_mode::{AlignmentMode, AlignmentParams};
use crate::export::ExportFormat;
use crate::scoring::ScoringScheme;
use crate::Result;

pub const DEFAULT_CONFIG_FILE: &str = "pairwise-align.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    pub mode: AlignmentMode,
    pub scoring: ScoringScheme,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ExportFormat,
}

impl AlignerConfig {
    /// Explicit path, else `pairwise-align.toml` in the working directory,
    /// else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    info!("Using default configuration");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn params(&self) -> AlignmentParams {
        AlignmentParams::new(self.mode, self.scoring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = AlignerConfig::default();
        assert_eq!(config.mode, AlignmentMode::Global);
        assert_eq!(config.scoring, ScoringScheme::new(1, -1, -1));
        assert_eq!(config.output.format, ExportFormat::Text);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = AlignerConfig::from_toml_str("mode = \"local\"\n[scoring]\nmatch = 3\n").unwrap();
        assert_eq!(config.mode, AlignmentMode::Local);
        assert_eq!(config.scoring.match_score, 3);
        assert_eq!(config.scoring.mismatch, -1);
        assert_eq!(config.scoring.gap, -1);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(AlignerConfig::from_toml_str("mode = \"semiglobal\"").is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = AlignerConfig {
            mode: AlignmentMode::Local,
            scoring: ScoringScheme::new(2, -3, -4),
            output: OutputConfig {
                format: ExportFormat::Json,
            },
        };
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", config.to_toml_string().unwrap()).unwrap();

        let loaded = AlignerConfig::load(Some(file.path())).unwrap();
        assert_eq!(loaded, config);
    }
}
