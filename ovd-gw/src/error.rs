//! Error types for ovd-gw

use thiserror::Error;

/// Main error type for the gateway service
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store / auth gate errors
    #[error("Auth error: {0}")]
    Auth(#[from] ovd_common::Error),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using ovd-gw Error
pub type Result<T> = std::result::Result<T, Error>;
