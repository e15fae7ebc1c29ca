//! Error types for the synfilter library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`SynfilterError`] enum. Invalid rule input and misconfiguration are
//! reported through it; violated internal invariants of the matcher are
//! not (they panic).
//!
//! # Examples
//!
//! ```
//! use synfilter::error::{Result, SynfilterError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SynfilterError::invalid_argument("input cannot be empty"))
//! }
//!
//! assert!(example_operation().is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for synfilter operations.
#[derive(Error, Debug)]
pub enum SynfilterError {
    /// I/O errors (reading rule files, writing output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A rejected argument: empty phrases, holes, missing FST, ...
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A rule file could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number of the offending rule
        line: usize,
        /// What went wrong
        message: String,
    },

    /// FST construction errors
    #[error("FST error: {0}")]
    Fst(#[from] fst::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SynfilterError.
pub type Result<T> = std::result::Result<T, SynfilterError>;

impl SynfilterError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SynfilterError::InvalidArgument(msg.into())
    }

    /// Create a new parse error for the given 1-based line.
    pub fn parse_at<S: Into<String>>(line: usize, msg: S) -> Self {
        SynfilterError::Parse {
            line,
            message: msg.into(),
        }
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SynfilterError::Other(msg.into())
    }

    /// The line number carried by a parse error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            SynfilterError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
