//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use depletion_core::{LineOutcome, ProcessingError, ProcessingStats};
use std::io::{self, Write};

/// Markdown formatter - outputs results as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    source: String,
    header_written: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            source: String::new(),
            header_written: false,
        }
    }

    fn write_header(&mut self) -> io::Result<()> {
        if !self.header_written {
            writeln!(self.writer, "| Source | Line | Input | ETA |")?;
            writeln!(self.writer, "|--------|-----:|-------|----:|")?;
            self.header_written = true;
        }
        Ok(())
    }
}

/// Keep cell contents from breaking the table
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Wrap `text` in a code span that survives backticks inside it
///
/// The fence is one backtick longer than the longest run in `text`. A
/// leading or trailing backtick needs a space between it and the fence.
fn code_cell(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let pad = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };

    format!("{fence}{pad}{}{pad}{fence}", escape_cell(text))
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn begin_input(&mut self, name: &str) -> io::Result<()> {
        self.source = escape_cell(name);
        Ok(())
    }

    fn format_outcome(&mut self, outcome: &LineOutcome) -> io::Result<()> {
        self.write_header()?;
        writeln!(
            self.writer,
            "| {} | {} | {} | {} |",
            self.source,
            outcome.line_number,
            code_cell(outcome.text.trim()),
            outcome.eta
        )
    }

    fn format_failure(&mut self, failure: &ProcessingError) -> io::Result<()> {
        self.write_header()?;
        writeln!(
            self.writer,
            "| {} | {} | {} | *{} error: {}* |",
            self.source,
            failure.line_number,
            code_cell(failure.text.trim()),
            failure.kind(),
            escape_cell(&failure.source.to_string())
        )
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn finish(&mut self, stats: &ProcessingStats) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total lines: {}, computed: {}, skipped: {}*",
            stats.lines_read, stats.lines_processed, stats.lines_skipped
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
