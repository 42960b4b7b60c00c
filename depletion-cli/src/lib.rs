//! Depletion CLI library
//!
//! This library provides the command-line interface for computing the time
//! to exhaustion of parallel depletion scenarios.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
pub use logging::init_logging;
