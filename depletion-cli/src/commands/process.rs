//! Process command implementation

use crate::commands::GlobalArgs;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_inputs, InputSource};
use crate::output::{FormatterSink, OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use depletion_core::{Config, ErrorPolicy, LineProcessor, ProcessingStats};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Default, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob, `-` for stdin; default: stdin)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// What to do with a malformed line: abort or skip [default: abort]
    #[arg(long, value_name = "POLICY")]
    pub on_error: Option<ErrorPolicy>,

    /// Ignore whitespace-only lines instead of rejecting them
    #[arg(long)]
    pub skip_blank: bool,

    /// Write JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Settings after merging the config file with command-line flags
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    /// Error policy for the processor
    pub on_error: ErrorPolicy,
    /// Blank-line handling for the processor
    pub skip_blank_lines: bool,
    /// Output format
    pub format: OutputFormat,
    /// Indent JSON output
    pub pretty_json: bool,
}

impl ProcessArgs {
    /// Execute the process command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        log::info!("Starting scenario processing");
        log::debug!("Arguments: {:?}", self);

        let config = CliConfig::load(self.config.as_deref())?;
        let settings = self.resolve(&config);
        log::debug!("Settings: {:?}", settings);

        let sources = resolve_inputs(&self.input)?;
        let processor = LineProcessor::with_config(
            Config::builder()
                .error_policy(settings.on_error)
                .skip_blank_lines(settings.skip_blank_lines)
                .build(),
        );
        log::debug!("Processor config: {:?}", processor.config());

        let writer = self.open_writer()?;
        let mut formatter = settings.format.formatter(writer, settings.pretty_json);

        let show_progress = !global.quiet && self.output.is_some() && sources.len() > 1;
        let mut progress = ProgressReporter::new(show_progress);
        progress.init_inputs(sources.len() as u64);

        let mut stats = ProcessingStats::default();
        for source in &sources {
            match Self::process_source(&processor, source, formatter.as_mut()) {
                Ok(source_stats) => {
                    stats.merge(&source_stats);
                    progress.input_completed(&source.to_string());
                }
                Err(e) => {
                    progress.abandon();
                    // Keep whatever was computed before the failure
                    if let Err(flush_err) = formatter.flush() {
                        log::warn!("Failed to flush output: {flush_err}");
                    }
                    return Err(e);
                }
            }
        }

        progress.finish();
        formatter.finish(&stats)?;

        log::info!(
            "Processed {} line(s) from {} input(s), {} skipped",
            stats.lines_processed,
            sources.len(),
            stats.lines_skipped
        );

        if !stats.is_clean() {
            return Err(CliError::SkippedLines(stats.lines_skipped).into());
        }

        Ok(())
    }

    /// Merge command-line flags over the configuration file
    pub fn resolve(&self, config: &CliConfig) -> ResolvedSettings {
        ResolvedSettings {
            on_error: self.on_error.unwrap_or(config.processing.on_error),
            skip_blank_lines: self.skip_blank || config.processing.skip_blank_lines,
            format: self.format.unwrap_or(config.output.default_format),
            pretty_json: config.output.pretty_json && !self.compact,
        }
    }

    fn process_source(
        processor: &LineProcessor,
        source: &InputSource,
        formatter: &mut dyn OutputFormatter,
    ) -> Result<ProcessingStats> {
        let name = source.to_string();
        log::info!("Processing {name}");

        let reader = source
            .to_input()
            .into_buf_read()
            .with_context(|| format!("Failed to open input: {name}"))?;

        formatter.begin_input(&name)?;
        let stats = processor
            .process_reader(reader, &mut FormatterSink::new(formatter))
            .with_context(|| format!("Failed to process {name}"))?;

        Ok(stats)
    }

    fn open_writer(&self) -> Result<Box<dyn Write + Send>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: 0,
        }
    }

    fn write_input(dir: &TempDir, name: &str, content: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_flags_override_config() {
        let config = CliConfig::from_toml(
            "[processing]\non_error = \"skip\"\n[output]\ndefault_format = \"markdown\"\n",
        )
        .unwrap();

        let args = ProcessArgs {
            format: Some(OutputFormat::Json),
            compact: true,
            ..Default::default()
        };
        let settings = args.resolve(&config);

        assert_eq!(settings.on_error, ErrorPolicy::Skip);
        assert_eq!(settings.format, OutputFormat::Json);
        assert!(!settings.pretty_json);
        assert!(!settings.skip_blank_lines);

        let args = ProcessArgs {
            on_error: Some(ErrorPolicy::Abort),
            skip_blank: true,
            ..Default::default()
        };
        let settings = args.resolve(&config);
        assert_eq!(settings.on_error, ErrorPolicy::Abort);
        assert_eq!(settings.format, OutputFormat::Markdown);
        assert!(settings.skip_blank_lines);
    }

    #[test]
    fn test_writes_etas_to_output_file() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "in.txt", "100 10\n100 10 10\n10 3\n1 1 1 1\n");
        let output = dir.path().join("out.txt");

        let args = ProcessArgs {
            input: vec![input],
            output: Some(output.clone()),
            ..Default::default()
        };
        args.execute(&quiet()).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "1000\n500\n30\n1\n");
    }

    #[test]
    fn test_abort_keeps_earlier_results() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "in.txt", "100 10\n50\n10 3\n");
        let output = dir.path().join("out.txt");

        let args = ProcessArgs {
            input: vec![input],
            output: Some(output.clone()),
            ..Default::default()
        };
        let err = args.execute(&quiet()).unwrap_err();

        assert!(format!("{err:#}").contains("line 2"));
        assert_eq!(fs::read_to_string(&output).unwrap(), "1000\n");
    }

    #[test]
    fn test_skip_policy_reports_skipped_lines() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "in.txt", "100 10\nnope\n10 3\n");
        let output = dir.path().join("out.txt");

        let args = ProcessArgs {
            input: vec![input],
            output: Some(output.clone()),
            on_error: Some(ErrorPolicy::Skip),
            ..Default::default()
        };
        let err = args.execute(&quiet()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::SkippedLines(1))
        ));
        assert_eq!(fs::read_to_string(&output).unwrap(), "1000\n30\n");
    }

    #[test]
    fn test_multiple_inputs_are_concatenated() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, "a.txt", "100 10\n");
        write_input(&dir, "b.txt", "10 3\n");
        let output = dir.path().join("out.json");

        let args = ProcessArgs {
            input: vec![format!("{}/*.txt", dir.path().display())],
            output: Some(output.clone()),
            format: Some(OutputFormat::Json),
            ..Default::default()
        };
        args.execute(&quiet()).unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(doc["results"][0]["eta"], 1000);
        assert_eq!(doc["results"][1]["eta"], 30);
        assert_eq!(doc["results"][1]["line"], 1);
        assert_eq!(doc["stats"]["lines_processed"], 2);
    }
}
