//! Error types for the core crate.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by settings stores and config helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem error from a file-backed store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store-specific failure (poisoned lock, malformed backing file, etc.)
    #[error("Store error: {0}")]
    Store(String),
}

impl Error {
    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}
