//! Line-by-line ETA processor

use std::io::{self, BufRead};

use crate::config::Config;
use crate::error::{DepletionError, ProcessingError};
use crate::input::Input;
use crate::output::{LineOutcome, Output, ProcessingStats};
use crate::scenario::{Eta, Scenario};

/// Receives results as soon as each line is computed
pub trait ResultSink {
    /// Called once per line that produced an ETA
    fn outcome(&mut self, outcome: &LineOutcome) -> io::Result<()>;

    /// Called once per line rejected under the skip policy
    fn failure(&mut self, _failure: &ProcessingError) -> io::Result<()> {
        Ok(())
    }
}

impl<F> ResultSink for F
where
    F: FnMut(&LineOutcome) -> io::Result<()>,
{
    fn outcome(&mut self, outcome: &LineOutcome) -> io::Result<()> {
        self(outcome)
    }
}

impl ResultSink for Output {
    fn outcome(&mut self, outcome: &LineOutcome) -> io::Result<()> {
        self.outcomes.push(outcome.clone());
        Ok(())
    }

    fn failure(&mut self, failure: &ProcessingError) -> io::Result<()> {
        self.failures.push(ProcessingError {
            line_number: failure.line_number,
            text: failure.text.clone(),
            source: clone_error(&failure.source),
        });
        Ok(())
    }
}

// ParseFloatError is Clone but io::Error is not
fn clone_error(error: &DepletionError) -> DepletionError {
    match error {
        DepletionError::InvalidNumber {
            column,
            token,
            source,
        } => DepletionError::InvalidNumber {
            column: *column,
            token: token.clone(),
            source: source.clone(),
        },
        DepletionError::MissingStorage => DepletionError::MissingStorage,
        DepletionError::DivisionByZero(reason) => DepletionError::DivisionByZero(*reason),
        DepletionError::NonFinite {
            storage,
            combined_rate,
        } => DepletionError::NonFinite {
            storage: *storage,
            combined_rate: *combined_rate,
        },
        DepletionError::Io(e) => DepletionError::Io(io::Error::new(e.kind(), e.to_string())),
    }
}

/// Turns scenario lines into ETAs
///
/// Lines are independent: nothing is carried from one line to the next, so
/// the same line always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct LineProcessor {
    config: Config,
}

impl LineProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute the ETA for a single line
    pub fn process_line(&self, line: &str) -> Result<Eta, DepletionError> {
        Scenario::parse(line)?.eta()
    }

    /// Read lines until end of stream, handing each result to `sink`
    ///
    /// Under the abort policy the first malformed line ends the run with an
    /// error; results already handed to the sink stay delivered.
    pub fn process_reader<R, S>(
        &self,
        mut reader: R,
        sink: &mut S,
    ) -> Result<ProcessingStats, ProcessingError>
    where
        R: BufRead,
        S: ResultSink + ?Sized,
    {
        let mut stats = ProcessingStats::default();
        let mut buf = String::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            line_number += 1;

            let read = reader
                .read_line(&mut buf)
                .map_err(|e| Self::line_error(line_number, "", e.into()))?;
            if read == 0 {
                break;
            }
            stats.lines_read += 1;

            let text = buf.trim_end_matches(['\n', '\r']);

            if self.config.skip_blank_lines && text.trim().is_empty() {
                log::trace!("line {line_number}: blank, skipped");
                stats.blank_lines += 1;
                continue;
            }

            match self.process_line(text) {
                Ok(eta) => {
                    log::trace!("line {line_number}: {text:?} -> {eta}");
                    let outcome = LineOutcome {
                        line_number,
                        text: text.to_string(),
                        eta,
                    };
                    sink.outcome(&outcome)
                        .map_err(|e| Self::line_error(line_number, text, e.into()))?;
                    stats.lines_processed += 1;
                }
                Err(source) => {
                    let error = Self::line_error(line_number, text, source);
                    if self.config.is_fatal(&error.source) {
                        return Err(error);
                    }

                    log::warn!("skipping {error}");
                    sink.failure(&error)
                        .map_err(|e| Self::line_error(line_number, text, e.into()))?;
                    stats.lines_skipped += 1;
                }
            }
        }

        log::debug!(
            "processed {} of {} lines ({} skipped, {} blank)",
            stats.lines_processed,
            stats.lines_read,
            stats.lines_skipped,
            stats.blank_lines
        );

        Ok(stats)
    }

    /// Open `input` and stream it through `sink`
    pub fn process_input<S>(
        &self,
        input: Input,
        sink: &mut S,
    ) -> Result<ProcessingStats, ProcessingError>
    where
        S: ResultSink + ?Sized,
    {
        log::debug!("reading {}", input.name());
        let reader = input
            .into_buf_read()
            .map_err(|e| Self::line_error(0, "", e.into()))?;
        self.process_reader(reader, sink)
    }

    /// Process `input` and collect everything in memory
    pub fn process(&self, input: Input) -> Result<Output, ProcessingError> {
        let mut output = Output::default();
        let stats = self.process_input(input, &mut output)?;
        output.stats = stats;
        Ok(output)
    }

    /// Process in-memory text (convenience method)
    pub fn process_text(&self, text: &str) -> Result<Output, ProcessingError> {
        self.process(Input::from_text(text))
    }

    fn line_error(line_number: usize, text: &str, source: DepletionError) -> ProcessingError {
        ProcessingError {
            line_number,
            text: text.to_string(),
            source,
        }
    }
}
