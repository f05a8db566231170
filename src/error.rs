//! Error types for the qtoe crate

use thiserror::Error;

/// Main error type for the qtoe crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position ({row}, {col}) is out of bounds (must be 0-2)")]
    InvalidPosition { row: usize, col: usize },

    #[error("board string has {got} cells, expected {expected} in '{context}'")]
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

    #[error("state index {index} is out of range (must be below {limit})")]
    InvalidStateIndex { index: usize, limit: usize },

    #[error("action index {index} is out of range (must be 0-8)")]
    InvalidActionIndex { index: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("value table has {got} entries, expected {expected}")]
    TableSize { expected: usize, got: usize },

    #[error("unsupported agent save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("no agent stored at '{key}'")]
    NotFound { key: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
