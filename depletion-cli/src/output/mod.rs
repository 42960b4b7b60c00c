//! Output formatting module

use anyhow::Result;
use depletion_core::{LineOutcome, ProcessingError, ProcessingStats, ResultSink};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Called before the lines of each input are processed
    fn begin_input(&mut self, _name: &str) -> io::Result<()> {
        Ok(())
    }

    /// Format and output a single result
    fn format_outcome(&mut self, outcome: &LineOutcome) -> io::Result<()>;

    /// Record a line rejected under the skip policy
    fn format_failure(&mut self, _failure: &ProcessingError) -> io::Result<()> {
        Ok(())
    }

    /// Push everything written so far to the underlying writer
    fn flush(&mut self) -> io::Result<()>;

    /// Finalize output (e.g., write the JSON document)
    fn finish(&mut self, stats: &ProcessingStats) -> Result<()>;
}

/// Adapts a formatter to the core processor's result sink
pub struct FormatterSink<'a> {
    formatter: &'a mut dyn OutputFormatter,
}

impl<'a> FormatterSink<'a> {
    /// Wrap a formatter
    pub fn new(formatter: &'a mut dyn OutputFormatter) -> Self {
        Self { formatter }
    }
}

impl ResultSink for FormatterSink<'_> {
    fn outcome(&mut self, outcome: &LineOutcome) -> io::Result<()> {
        self.formatter.format_outcome(outcome)
    }

    fn failure(&mut self, failure: &ProcessingError) -> io::Result<()> {
        self.formatter.format_failure(failure)
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One ETA per line, nothing else
    #[default]
    Text,
    /// JSON document with results, failures and statistics
    Json,
    /// Markdown table
    Markdown,
}

impl OutputFormat {
    /// All formats, in listing order
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Markdown,
    ];

    /// Lowercase name as accepted by `--format`
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
        }
    }

    /// One-line description for `list formats`
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "One ETA per input line (default)",
            OutputFormat::Json => "JSON document with results, failures and statistics",
            OutputFormat::Markdown => "Markdown table with a summary line",
        }
    }

    /// Build a formatter for this format over `writer`
    pub fn formatter(
        &self,
        writer: Box<dyn Write + Send>,
        pretty_json: bool,
    ) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
