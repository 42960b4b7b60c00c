//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use depletion_core::{LineOutcome, ProcessingStats};
use std::io::{self, Write};

/// Plain text formatter - outputs one ETA per line
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_outcome(&mut self, outcome: &LineOutcome) -> io::Result<()> {
        writeln!(self.writer, "{}", outcome.eta)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn finish(&mut self, _stats: &ProcessingStats) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
