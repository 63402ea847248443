//! Error types for daymark.

use thiserror::Error;

/// Errors surfaced by the storage layer, configuration, and CLI.
#[derive(Debug, Error)]
pub enum DaymarkError {
    /// The embedded database rejected an operation (open, constraint, I/O).
    #[error("Database error: {0}")]
    Database(String),

    /// Stored tables or rows do not match the layout this build expects.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller supplied a value that violates a model rule.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input text or output serialization failed.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DaymarkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl DaymarkError {
    /// Map a `rusqlite` error, routing row-decoding failures to [`DaymarkError::Schema`].
    pub(crate) fn from_sqlite(context: &str, e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::InvalidColumnName(_)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::FromSqlConversionFailure(..) => {
                Self::Schema(format!("{context}: {e}"))
            },
            _ => Self::Database(format!("{context}: {e}")),
        }
    }
}
