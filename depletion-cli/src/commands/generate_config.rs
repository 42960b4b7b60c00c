//! Generate config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Template written by `generate-config`
pub const CONFIG_TEMPLATE: &str = r#"# depletion configuration

[processing]
# What to do with a malformed line:
#   "abort" - stop at the first bad line and exit non-zero (default)
#   "skip"  - report the line, keep going, exit non-zero at the end
on_error = "abort"

# Ignore whitespace-only lines instead of treating them as errors
skip_blank_lines = false

[output]
# One of "text", "json", "markdown"
default_format = "text"

# Indent JSON output
pretty_json = true
"#;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "depletion.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        fs::write(&self.output, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Use it for processing:");
        println!("   depletion process --config {}", self.output.display());

        Ok(())
    }
}
