//! Error types for scenario parsing and ETA arithmetic

use std::fmt;
use std::num::ParseFloatError;
use thiserror::Error;

/// Why a division would have had a zero divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroDivisor {
    /// The line carried a storage value but no rates
    NoRates,
    /// A rate was zero, so its reciprocal is undefined
    ZeroRate {
        /// 1-based position among the rates
        index: usize,
    },
    /// The reciprocals summed to exactly zero
    RatesCancel,
}

impl fmt::Display for ZeroDivisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroDivisor::NoRates => write!(f, "no rates given, combined rate is zero"),
            ZeroDivisor::ZeroRate { index } => write!(f, "rate #{index} is zero"),
            ZeroDivisor::RatesCancel => write!(f, "rates cancel out, combined rate is zero"),
        }
    }
}

/// Errors raised while turning a line into an ETA
#[derive(Debug, Error)]
pub enum DepletionError {
    /// A token is not a valid number
    #[error("invalid number {token:?} at column {column}: {source}")]
    InvalidNumber {
        /// 1-based token position on the line
        column: usize,
        /// The offending token
        token: String,
        /// Underlying float parse failure
        #[source]
        source: ParseFloatError,
    },

    /// The line has no tokens at all
    #[error("no storage value present")]
    MissingStorage,

    /// The combined rate or a reciprocal would divide by zero
    #[error("division by zero: {0}")]
    DivisionByZero(ZeroDivisor),

    /// The quotient is NaN or infinite
    #[error("non-finite result: storage {storage} / combined rate {combined_rate}")]
    NonFinite {
        /// Parsed storage value
        storage: f64,
        /// Sum of reciprocals
        combined_rate: f64,
    },

    /// Reading the input stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`DepletionError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorKind {
    /// A token failed to parse
    Parse,
    /// The line had no storage value
    Structural,
    /// Division by zero, non-finite or out-of-range result
    Arithmetic,
    /// The input stream failed
    Io,
}

impl ErrorKind {
    /// Lowercase name used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Structural => "structural",
            ErrorKind::Arithmetic => "arithmetic",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DepletionError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DepletionError::InvalidNumber { .. } => ErrorKind::Parse,
            DepletionError::MissingStorage => ErrorKind::Structural,
            DepletionError::DivisionByZero(_) | DepletionError::NonFinite { .. } => {
                ErrorKind::Arithmetic
            }
            DepletionError::Io(_) => ErrorKind::Io,
        }
    }
}

/// A [`DepletionError`] tied to the input line that produced it
#[derive(Debug, Error)]
#[error("line {line_number}: {source}")]
pub struct ProcessingError {
    /// 1-based line number in the input
    pub line_number: usize,
    /// The raw line, without its terminator
    pub text: String,
    /// What went wrong
    #[source]
    pub source: DepletionError,
}

impl ProcessingError {
    /// Classify the underlying error
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, DepletionError>;
