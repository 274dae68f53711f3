//! Error types for e2ebench
//!
//! Every failure is surfaced to the caller of `track`, `close` or
//! `visualize`. Nothing is logged-and-swallowed: a benchmark record that is
//! silently degraded is worse than no record at all.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// e2ebench error types
#[derive(Error, Debug)]
pub enum Error {
    /// Confusion matrix dimensions disagree with the label count.
    ///
    /// Raised eagerly by the tracker, never at decode time.
    #[error("Shape mismatch: matrix is {rows}x{columns} but {labels} labels were given\nA confusion matrix must be square with one label per row")]
    ShapeMismatch {
        /// Number of rows in the submitted matrix
        rows: usize,
        /// Length of the first non-conforming row (or of row 0)
        columns: usize,
        /// Number of labels supplied
        labels: usize,
    },

    /// A hyperparameter measurement lacks a declared name or the target.
    #[error("Missing field: '{0}' not found in the given measurement")]
    MissingField(String),

    /// A payload cannot be decoded as the measure type it claims.
    #[error("Corrupt payload for measure type '{measure_type}': {reason}")]
    CorruptPayload {
        /// Measure type the caller asked to decode
        measure_type: String,
        /// What went wrong
        reason: String,
    },

    /// Caller supplied arguments the operation cannot accept.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by a benchmark log sink, propagated unchanged.
    #[error("Sink error: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a [`Error::CorruptPayload`] for the given measure type.
    pub(crate) fn corrupt(measure_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorruptPayload {
            measure_type: measure_type.into(),
            reason: reason.into(),
        }
    }
}
