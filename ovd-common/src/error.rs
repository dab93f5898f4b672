//! Common error types for OVD

use thiserror::Error;

/// Common result type for OVD operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across OVD services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store access error
    #[error("Store error: {0}")]
    Store(String),

    /// Persisted record could not be decoded
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
