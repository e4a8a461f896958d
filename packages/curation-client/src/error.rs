//! Typed errors for the curation API client.

use thiserror::Error;

/// Errors returned by the persistence API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("failed to decode API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
