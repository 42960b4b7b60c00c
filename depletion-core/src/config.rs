//! Processing configuration

use std::fmt;
use std::str::FromStr;

use crate::error::{DepletionError, ErrorKind};

/// What to do when a line cannot be turned into an ETA
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorPolicy {
    /// Stop at the first malformed line
    #[default]
    Abort,
    /// Report the line and keep going
    Skip,
}

impl ErrorPolicy {
    /// Lowercase name used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Abort => "abort",
            ErrorPolicy::Skip => "skip",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown error policy {0:?} (expected \"abort\" or \"skip\")")]
pub struct UnknownPolicy(pub String);

impl FromStr for ErrorPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(ErrorPolicy::Abort),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Line processing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub(crate) error_policy: ErrorPolicy,
    pub(crate) skip_blank_lines: bool,
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Configured error policy
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    /// Whether whitespace-only lines are ignored instead of rejected
    pub fn skip_blank_lines(&self) -> bool {
        self.skip_blank_lines
    }

    /// Whether an error of this kind stops processing
    ///
    /// I/O failures always abort; there is nothing sensible to skip to.
    pub(crate) fn is_fatal(&self, error: &DepletionError) -> bool {
        match self.error_policy {
            ErrorPolicy::Abort => true,
            ErrorPolicy::Skip => error.kind() == ErrorKind::Io,
        }
    }
}

/// Fluent builder for [`Config`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    error_policy: Option<ErrorPolicy>,
    skip_blank_lines: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error policy
    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = Some(policy);
        self
    }

    /// Ignore whitespace-only lines
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = Some(skip);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        let mut config = Config::default();

        if let Some(policy) = self.error_policy {
            config.error_policy = policy;
        }

        if let Some(skip) = self.skip_blank_lines {
            config.skip_blank_lines = skip;
        }

        config
    }
}
