//! Common error types for Trackdle

use thiserror::Error;

/// Common result type for Trackdle operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Trackdle crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (wraps serde_json::Error)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough distinct, recently unused puzzles to rotate
    #[error("Insufficient puzzle data: {0}")]
    InsufficientData(String),

    /// Snippet rendering (external transcoder) failed
    #[error("Snippet rendering failed: {0}")]
    Render(String),

    /// Guess submitted after the session reached a terminal outcome
    #[error("Session already completed")]
    AlreadyCompleted,

    /// Optimistic-concurrency check failed on a stored record
    #[error("Concurrent update detected: {0}")]
    Conflict(String),

    /// Internal invariant violation
    #[error("Internal error: {0}")]
    Internal(String),
}
