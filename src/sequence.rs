//! Sequence normalisation.
//!
//! Raw input may be a bare residue string or FASTA text. Header lines
//! (`>`) are dropped, the remaining lines are trimmed and concatenated,
//! anything that is not an ASCII letter is discarded and the rest is
//! upper-cased.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::{debug, warn};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    id: Option<String>,
    residues: String,
    discarded: usize,
}

impl Sequence {
    /// Same as [`Sequence::from_raw`].
    pub fn new(residues: &str) -> Self {
        Self::from_raw(residues)
    }

    pub fn from_raw(raw: &str) -> Self {
        let mut id = None;
        let mut headers = 0usize;
        let mut residues = String::with_capacity(raw.len());
        let mut discarded = 0usize;

        for line in raw.lines() {
            let line = line.trim();
            if let Some(header) = line.strip_prefix('>') {
                headers += 1;
                if id.is_none() {
                    id = header.split_whitespace().next().map(str::to_string);
                }
                continue;
            }
            for c in line.chars() {
                if c.is_ascii_alphabetic() {
                    residues.push(c.to_ascii_uppercase());
                } else {
                    discarded += 1;
                }
            }
        }

        if headers > 1 {
            warn!(
                "Input holds {} FASTA records; their residues are concatenated",
                headers
            );
        }
        if discarded > 0 {
            warn!("Discarded {} non-alphabetic characters", discarded);
        }

        Self {
            id,
            residues,
            discarded,
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut raw = String::new();
        for line in BufReader::new(reader).lines() {
            raw.push_str(&line?);
            raw.push('\n');
        }
        Ok(Self::from_raw(&raw))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading sequence from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Identifier from the first FASTA header, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn as_str(&self) -> &str {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Characters dropped during normalisation.
    pub fn discarded(&self) -> usize {
        self.discarded
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residues)
    }
}

impl AsRef<str> for Sequence {
    fn as_ref(&self) -> &str {
        &self.residues
    }
}

/// Normalises raw text (plain or FASTA) into an upper-case residue string.
pub fn normalize(raw: &str) -> String {
    Sequence::from_raw(raw).residues
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_and_uppercases() {
        assert_eq!(normalize("ac gt-1\nnn"), "ACGTNN");
        assert_eq!(Sequence::from_raw("a c").discarded(), 1);
    }

    #[test]
    fn drops_fasta_headers() {
        let seq = Sequence::from_raw(">seq1 sample\nACGT\n  acgt  \n");
        assert_eq!(seq.as_str(), "ACGTACGT");
        assert_eq!(seq.id(), Some("seq1"));
    }

    #[test]
    fn header_only_is_empty() {
        let seq = Sequence::from_raw(">only a header\n\n");
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }

    #[test]
    fn concatenates_multiple_records() {
        let seq = Sequence::from_raw(">a\nAC\n>b\nGT\n");
        assert_eq!(seq.as_str(), "ACGT");
        assert_eq!(seq.id(), Some("a"));
    }

    #[test]
    fn reads_from_reader() {
        let seq = Sequence::from_reader(">x\nacg\nt\n".as_bytes()).unwrap();
        assert_eq!(seq.to_string(), "ACGT");
    }
}
