//! Logging initialisation

use crate::commands::GlobalArgs;

/// Map `-v` occurrences to a default filter
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` overrides the level derived from `-v`. Logs go to stderr so
/// stdout carries results only.
pub fn init_logging(global: &GlobalArgs) {
    if global.quiet {
        return;
    }

    let env = env_logger::Env::default().default_filter_or(level_for(global.verbose));
    // Ignore a second initialisation (e.g. from tests)
    let _ = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Stderr)
        .try_init();
}
