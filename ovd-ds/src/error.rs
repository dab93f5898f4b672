//! Error types for ovd-ds
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation.

use thiserror::Error;

/// Main error type for the detection session service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Camera capability errors (acquisition denied, sampling failure)
    #[error("Camera error: {0}")]
    Camera(String),

    /// Speech output errors
    #[error("Speech error: {0}")]
    Speech(String),

    /// Remote inference call failed (deliberately carries no detail)
    #[error(transparent)]
    Inference(#[from] crate::detect::inference::InferenceError),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Operation not valid in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience Result type using ovd-ds Error
pub type Result<T> = std::result::Result<T, Error>;
