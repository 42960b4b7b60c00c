//! `depletion` - time to exhaustion for parallel depletion scenarios
//!
//! Reads `<storage> <rate>...` lines from stdin (or files) and prints
//! `ceil(storage / Σ 1/rate)` for each.

use anyhow::Result;
use clap::Parser;
use depletion_cli::commands::{process::ProcessArgs, Commands, GlobalArgs};

#[derive(Debug, Parser)]
#[command(name = "depletion", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Bare invocation runs `process` with these options
    #[command(flatten)]
    process: ProcessArgs,

    #[command(flatten)]
    global: GlobalArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    depletion_cli::init_logging(&cli.global);

    match &cli.command {
        Some(command) => command.execute(&cli.global),
        None => cli.process.execute(&cli.global),
    }
}
