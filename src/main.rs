use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use log::LevelFilter;

use pairwise_aligner::export::{write_report, write_score_matrix_csv};
use pairwise_aligner::{
    validate_pair, AlignerConfig, AlignmentMode, ExportFormat, PairwiseAligner, Sequence,
};

/// Pairwise global (Needleman-Wunsch) or local (Smith-Waterman) alignment.
#[derive(Parser, Debug)]
#[command(name = "pairwise-align", version)]
#[command(group(ArgGroup::new("first").required(true).args(["seq1", "file1"])))]
#[command(group(ArgGroup::new("second").required(true).args(["seq2", "file2"])))]
struct Cli {
    /// First sequence as literal text
    #[arg(long)]
    seq1: Option<String>,

    /// Second sequence as literal text
    #[arg(long)]
    seq2: Option<String>,

    /// File holding the first sequence (plain or FASTA)
    #[arg(long)]
    file1: Option<PathBuf>,

    /// File holding the second sequence (plain or FASTA)
    #[arg(long)]
    file2: Option<PathBuf>,

    /// Alignment mode: global (nw) or local (sw)
    #[arg(short, long)]
    mode: Option<AlignmentMode>,

    /// Score for identical residues
    #[arg(long = "match", allow_hyphen_values = true)]
    match_score: Option<i32>,

    /// Score for differing residues
    #[arg(long, allow_hyphen_values = true)]
    mismatch: Option<i32>,

    /// Score per gap column
    #[arg(long, allow_hyphen_values = true)]
    gap: Option<i32>,

    /// Configuration file (defaults to ./pairwise-align.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format: text, csv or json
    #[arg(short, long)]
    format: Option<ExportFormat>,

    /// Report destination, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also dump the score matrix as CSV to this path
    #[arg(long)]
    matrix_csv: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn apply_overrides(&self, config: &mut AlignerConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(match_score) = self.match_score {
            config.scoring.match_score = match_score;
        }
        if let Some(mismatch) = self.mismatch {
            config.scoring.mismatch = mismatch;
        }
        if let Some(gap) = self.gap {
            config.scoring.gap = gap;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

fn load_sequence(literal: Option<&str>, path: Option<&PathBuf>) -> Result<Sequence> {
    match (literal, path) {
        (Some(raw), _) => Ok(Sequence::from_raw(raw)),
        (None, Some(path)) => Sequence::from_file(path)
            .with_context(|| format!("Failed to read sequence file: {}", path.display())),
        (None, None) => bail!("No sequence given"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut config = AlignerConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let seq1 = load_sequence(cli.seq1.as_deref(), cli.file1.as_ref())?;
    let seq2 = load_sequence(cli.seq2.as_deref(), cli.file2.as_ref())?;
    validate_pair(&seq1, &seq2)?;

    let result = PairwiseAligner::from_config(&config).align(&seq1, &seq2)?;

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(&result, config.output.format, &mut writer)?;
            writer.flush()?;
            log::info!("Wrote {} report to {}", config.output.format, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(&result, config.output.format, &mut handle)?;
        }
    }

    if let Some(path) = &cli.matrix_csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create matrix file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_score_matrix_csv(&result, &mut writer)?;
        writer.flush()?;
        log::info!("Wrote score matrix to {}", path.display());
    }

    Ok(())
}
