//! Time-to-exhaustion arithmetic for parallel depletion scenarios
//!
//! A scenario is one line of text: a storage quantity followed by the rates
//! of the sources that deplete it in parallel. Each rate is combined as its
//! reciprocal, and the ETA is `ceil(storage / Σ 1/rate)`.
//!
//! # Architecture
//!
//! - **Scenario layer**: parsing a line and the ETA arithmetic
//! - **Processor layer**: streaming lines from an [`Input`] into a [`ResultSink`]
//! - **Configuration**: error policy and blank-line handling
//!
//! # Example
//!
//! ```rust
//! use depletion_core::{eta_for_line, Eta, LineProcessor};
//!
//! assert_eq!(eta_for_line("100 10 10").unwrap(), Eta::from(500));
//!
//! let processor = LineProcessor::new();
//! let output = processor.process_text("100 10\n10 3\n").unwrap();
//! assert_eq!(output.etas(), [1000, 30].map(Eta::from));
//!
//! // No rates means a zero combined rate
//! assert!(eta_for_line("50").is_err());
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processor;
pub mod scenario;

pub use config::{Config, ConfigBuilder, ErrorPolicy, UnknownPolicy};
pub use error::{DepletionError, ErrorKind, ProcessingError, Result, ZeroDivisor};
pub use input::Input;
pub use output::{LineOutcome, Output, ProcessingStats};
pub use processor::{LineProcessor, ResultSink};
pub use scenario::{eta_for_line, Eta, Scenario};
