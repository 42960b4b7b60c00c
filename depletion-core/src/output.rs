//! Per-line results and run statistics

use crate::error::ProcessingError;
use crate::scenario::Eta;

/// A successfully processed line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineOutcome {
    /// 1-based line number in the input
    #[cfg_attr(feature = "serde", serde(rename = "line"))]
    pub line_number: usize,
    /// The raw line, without its terminator
    #[cfg_attr(feature = "serde", serde(rename = "input"))]
    pub text: String,
    /// Computed time to exhaustion
    pub eta: Eta,
}

/// Counters for one processing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingStats {
    /// Physical lines read, including blank and rejected ones
    pub lines_read: usize,
    /// Lines that produced an ETA
    pub lines_processed: usize,
    /// Malformed lines passed over under the skip policy
    pub lines_skipped: usize,
    /// Whitespace-only lines ignored because blank skipping is on
    pub blank_lines: usize,
}

impl ProcessingStats {
    /// Fold another run's counters into this one
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.lines_read += other.lines_read;
        self.lines_processed += other.lines_processed;
        self.lines_skipped += other.lines_skipped;
        self.blank_lines += other.blank_lines;
    }

    /// True when no line was rejected
    pub fn is_clean(&self) -> bool {
        self.lines_skipped == 0
    }
}

/// Everything a run produced, collected in memory
#[derive(Debug, Default)]
pub struct Output {
    /// Lines that produced an ETA, in input order
    pub outcomes: Vec<LineOutcome>,
    /// Lines rejected under the skip policy, in input order
    pub failures: Vec<ProcessingError>,
    /// Run counters
    pub stats: ProcessingStats,
}

impl Output {
    /// The ETAs alone, in input order
    pub fn etas(&self) -> Vec<Eta> {
        self.outcomes.iter().map(|o| o.eta).collect()
    }
}
