//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use depletion_core::{Eta, LineOutcome, ProcessingError, ProcessingStats};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// JSON formatter - collects results and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    source: String,
    document: JsonDocument,
}

/// Top-level JSON document
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonDocument {
    /// Computed ETAs
    pub results: Vec<EtaRecord>,
    /// Lines rejected under the skip policy
    pub failures: Vec<FailureRecord>,
    /// Run counters
    pub stats: Option<ProcessingStats>,
}

/// One computed line
#[derive(Debug, Serialize, Deserialize)]
pub struct EtaRecord {
    /// Input the line came from
    pub source: String,
    /// 1-based line number within the source
    pub line: usize,
    /// The raw line
    pub input: String,
    /// Time to exhaustion, a JSON integer
    pub eta: Eta,
}

/// One rejected line
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Input the line came from
    pub source: String,
    /// 1-based line number within the source
    pub line: usize,
    /// The raw line
    pub input: String,
    /// Error class (parse, structural, arithmetic)
    pub kind: String,
    /// Error message
    pub error: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            source: String::new(),
            document: JsonDocument::default(),
        }
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn begin_input(&mut self, name: &str) -> io::Result<()> {
        self.source = name.to_string();
        Ok(())
    }

    fn format_outcome(&mut self, outcome: &LineOutcome) -> io::Result<()> {
        self.document.results.push(EtaRecord {
            source: self.source.clone(),
            line: outcome.line_number,
            input: outcome.text.clone(),
            eta: outcome.eta,
        });
        Ok(())
    }

    fn format_failure(&mut self, failure: &ProcessingError) -> io::Result<()> {
        self.document.failures.push(FailureRecord {
            source: self.source.clone(),
            line: failure.line_number,
            input: failure.text.clone(),
            kind: failure.kind().to_string(),
            error: failure.source.to_string(),
        });
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn finish(&mut self, stats: &ProcessingStats) -> Result<()> {
        self.document.stats = Some(*stats);
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
