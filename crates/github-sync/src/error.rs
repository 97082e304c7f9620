//! Error types for the GitHub sync crate.

use thiserror::Error;

/// Result type alias for GitHub sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that can occur while reading or writing remote documents.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Username, repo or token missing from the settings store
    #[error("GitHub sync is not configured")]
    NotConfigured,

    /// HTTP transport error (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the contents API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Remote payload could not be turned back into a document
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings store failure
    #[error("Settings error: {0}")]
    Store(#[from] reposync_core::Error),

    /// Invalid request (bad filename, header value, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SyncError {
    /// Create an API error from status and message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// HTTP status if this is an API error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// True for credential problems the user has to fix (401/403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_exposes_status() {
        let err = SyncError::api(404, "Not Found");
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn unauthorized_is_auth_failure() {
        assert!(SyncError::api(401, "Bad credentials").is_auth_failure());
        assert!(SyncError::api(403, "Forbidden").is_auth_failure());
        assert!(!SyncError::NotConfigured.is_auth_failure());
        assert_eq!(SyncError::decode("bad base64").status_code(), None);
    }
}
