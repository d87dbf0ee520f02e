//! Error types for the qttt crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the qttt crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action {action}: {reason}")]
    InvalidAction { action: usize, reason: &'static str },

    #[error("no legal actions available on a terminal board")]
    EmptyLegalSet,

    #[error("malformed value table at line {line}: {message}")]
    DataFormat { line: usize, message: String },

    #[error("cannot access '{}': {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input closed before a move was entered")]
    InputClosed,

    #[error("state index {value} is out of range (must be below {limit})")]
    StateOutOfRange { value: usize, limit: usize },

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid {kind} '{input}'. Expected one of: {expected}")]
    ParseOption {
        kind: &'static str,
        input: String,
        expected: &'static str,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error rejects a proposed move (out of range or occupied cell).
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, Error::InvalidAction { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
