//! Serialisers for a finished [`AlignmentResult`]: plain-text report, CSV
//! summary, JSON document and a CSV dump of the score matrix.

use std::collections::HashSet;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scoring::{AlignmentStats, Position};
use crate::traceback::AlignmentResult;
use crate::{AlignerError, Result, GAP_CHAR};

/// Residues per line in the text report.
pub const REPORT_LINE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = AlignerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AlignerError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn write_report<W: Write>(result: &AlignmentResult, format: ExportFormat, writer: &mut W) -> Result<()> {
    match format {
        ExportFormat::Text => write_text_report(result, writer),
        ExportFormat::Csv => write_csv_summary(result, writer),
        ExportFormat::Json => write_json(result, writer),
    }
}

pub fn write_text_report<W: Write>(result: &AlignmentResult, writer: &mut W) -> Result<()> {
    let scoring = result.scoring();
    let stats = result.stats();

    writeln!(writer, "# {} alignment ({})", result.mode(), result.mode().algorithm())?;
    writeln!(
        writer,
        "# Scoring: match={} mismatch={} gap={}",
        scoring.match_score, scoring.mismatch, scoring.gap
    )?;
    writeln!(writer, "Sequence 1: {} ({} residues)", result.seq1(), result.seq1().len())?;
    writeln!(writer, "Sequence 2: {} ({} residues)", result.seq2(), result.seq2().len())?;
    writeln!(writer, "Score:      {}", result.score())?;
    writeln!(writer, "Identity:   {:.2}%", result.identity())?;
    writeln!(
        writer,
        "Length:     {} (matches={} mismatches={} gaps={})",
        result.alignment_length(),
        stats.matches,
        stats.mismatches,
        stats.gaps
    )?;
    writeln!(writer, "CIGAR:      {}", result.cigar())?;
    writeln!(writer)?;

    let start = result.start();
    let match_line = result.match_line();
    let aligned1 = result.aligned_seq1().as_bytes();
    let aligned2 = result.aligned_seq2().as_bytes();
    let markers = match_line.as_bytes();

    // 1-based residue coordinates of the next column in each sequence.
    let mut pos1 = start.i + 1;
    let mut pos2 = start.j + 1;

    for offset in (0..aligned1.len()).step_by(REPORT_LINE_WIDTH) {
        let end = (offset + REPORT_LINE_WIDTH).min(aligned1.len());
        let chunk1 = &aligned1[offset..end];
        let chunk2 = &aligned2[offset..end];

        let next1 = pos1 + residues_in(chunk1);
        let next2 = pos2 + residues_in(chunk2);

        writeln!(writer, "Seq1 {:>6} {} {}", pos1, as_text(chunk1), next1 - 1)?;
        writeln!(writer, "     {:>6} {}", "", as_text(&markers[offset..end]))?;
        writeln!(writer, "Seq2 {:>6} {} {}", pos2, as_text(chunk2), next2 - 1)?;
        writeln!(writer)?;

        pos1 = next1;
        pos2 = next2;
    }

    Ok(())
}

fn residues_in(chunk: &[u8]) -> usize {
    chunk.iter().filter(|&&b| b != GAP_CHAR).count()
}

fn as_text(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub const CSV_SUMMARY_HEADER: &str =
    "mode,seq1,seq2,aligned_seq1,aligned_seq2,score,identity,matches,mismatches,gaps,length,cigar";

pub fn write_csv_summary<W: Write>(result: &AlignmentResult, writer: &mut W) -> Result<()> {
    let stats = result.stats();
    writeln!(writer, "{}", CSV_SUMMARY_HEADER)?;
    writeln!(
        writer,
        "{},{},{},{},{},{},{:.2},{},{},{},{},{}",
        result.mode(),
        result.seq1(),
        result.seq2(),
        result.aligned_seq1(),
        result.aligned_seq2(),
        result.score(),
        result.identity(),
        stats.matches,
        stats.mismatches,
        stats.gaps,
        result.alignment_length(),
        result.cigar()
    )?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    result: &'a AlignmentResult,
    stats: AlignmentStats,
    cigar: String,
    start: Position,
    end: Position,
}

pub fn write_json<W: Write>(result: &AlignmentResult, writer: &mut W) -> Result<()> {
    let report = JsonReport {
        result,
        stats: result.stats(),
        cigar: result.cigar(),
        start: result.start(),
        end: result.end(),
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)?;
    Ok(())
}

/// Full score matrix with residues as row/column labels. Cells on the
/// traceback path carry a trailing `*`.
pub fn write_score_matrix_csv<W: Write>(result: &AlignmentResult, writer: &mut W) -> Result<()> {
    let on_path: HashSet<Position> = result.path().iter().copied().collect();
    let matrix = result.matrix();

    let mut header = String::from(",-");
    for c in result.seq2().chars() {
        header.push(',');
        header.push(c);
    }
    writeln!(writer, "{}", header)?;

    let labels = std::iter::once('-').chain(result.seq1().chars());
    for (i, (label, row)) in labels.zip(matrix.iter_rows()).enumerate() {
        let mut line = label.to_string();
        for (j, value) in row.iter().enumerate() {
            line.push(',');
            line.push_str(&value.to_string());
            if on_path.contains(&Position::new(i, j)) {
                line.push('*');
            }
        }
        writeln!(writer, "{}", line)?;
    }
    Ok(())
}
