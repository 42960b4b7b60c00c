//! Validate command implementation

use crate::error::CliError;
use crate::input::resolve_inputs;
use anyhow::{Context, Result};
use clap::Args;
use depletion_core::{Config, ErrorPolicy, LineOutcome, LineProcessor, ProcessingError, ResultSink};
use std::io::{self, Write};

/// Arguments for the validate command
#[derive(Debug, Default, Args)]
pub struct ValidateArgs {
    /// Input files or patterns to check (supports glob, `-` for stdin; default: stdin)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Accept whitespace-only lines
    #[arg(long)]
    pub skip_blank: bool,
}

/// Prints each malformed line as soon as it is found
struct ValidationReport<W: Write> {
    writer: W,
    source: String,
    valid: usize,
    invalid: usize,
}

impl<W: Write> ResultSink for ValidationReport<W> {
    fn outcome(&mut self, _outcome: &LineOutcome) -> io::Result<()> {
        self.valid += 1;
        Ok(())
    }

    fn failure(&mut self, failure: &ProcessingError) -> io::Result<()> {
        self.invalid += 1;
        writeln!(
            self.writer,
            "✗ {}:{}: {} error: {}",
            self.source,
            failure.line_number,
            failure.kind(),
            failure.source
        )
    }
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        self.validate_to(io::stdout())
    }

    fn validate_to<W: Write>(&self, writer: W) -> Result<()> {
        // Every line is checked, so malformed ones never stop the run
        let processor = LineProcessor::with_config(
            Config::builder()
                .error_policy(ErrorPolicy::Skip)
                .skip_blank_lines(self.skip_blank)
                .build(),
        );

        let mut report = ValidationReport {
            writer,
            source: String::new(),
            valid: 0,
            invalid: 0,
        };

        for source in resolve_inputs(&self.input)? {
            report.source = source.to_string();
            let reader = source
                .to_input()
                .into_buf_read()
                .with_context(|| format!("Failed to open input: {source}"))?;
            processor
                .process_reader(reader, &mut report)
                .with_context(|| format!("Failed to read {source}"))?;
        }

        if report.invalid > 0 {
            writeln!(
                report.writer,
                "✗ {} of {} line(s) are malformed",
                report.invalid,
                report.valid + report.invalid
            )?;
            return Err(CliError::InvalidLines(report.invalid).into());
        }

        writeln!(report.writer, "✓ All {} line(s) are valid", report.valid)?;
        Ok(())
    }
}
