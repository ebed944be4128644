//! Error types for the sequencer library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{RunState, StepStatus};

/// Error type for configuring and building a sequencer.
///
/// Controller operations (`play`, `pause`, `reset`) are total and never
/// produce one of these; only the configuration surface can fail.
#[derive(Error, Debug)]
pub enum SequencerError {
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> SequencerError {
        SequencerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl SequencerError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a file system error for the given path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}

/// A snapshot that breaks the prefix-completed / single-active /
/// suffix-pending shape.
///
/// These are logic defects, never runtime conditions. Tests assert on them
/// through [`crate::Snapshot::check_invariant`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("cursor {cursor} is outside the sequence of {len} steps")]
    CursorOutOfRange { cursor: usize, len: usize },
    #[error("step at index {index} is {found}, expected {expected}")]
    UnexpectedStatus {
        index: usize,
        expected: StepStatus,
        found: StepStatus,
    },
    #[error("run state {state} does not match cursor {cursor} (playing: {is_playing})")]
    StateMismatch {
        state: RunState,
        cursor: usize,
        is_playing: bool,
    },
}

/// Result type alias for sequencer operations
pub type Result<T> = std::result::Result<T, SequencerError>;
