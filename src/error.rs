//! Error types for Filebox.

use thiserror::Error;

/// Common error type for Filebox.
#[derive(Error, Debug)]
pub enum FileboxError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid credentials or session token.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    ///
    /// The message is shown to API clients as-is.
    #[error("{0}")]
    Validation(String),

    /// A unique key is already taken.
    #[error("{0}")]
    Conflict(String),

    /// Resource not found, or not visible to the caller.
    #[error("{0} not found")]
    NotFound(String),

    /// The node exists but carries no content (folders).
    #[error("{0}")]
    NoContent(String),

    /// Work queue error.
    #[error("queue error: {0}")]
    Queue(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for FileboxError {
    fn from(e: sqlx::Error) -> Self {
        FileboxError::Database(e.to_string())
    }
}

/// Result type alias for Filebox operations.
pub type Result<T> = std::result::Result<T, FileboxError>;
