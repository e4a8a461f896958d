//! Typed errors for the extraction crate.
//!
//! Field extraction degrades instead of erroring (see the module docs on
//! [`crate::images`] and [`crate::price`]); these types cover the two places
//! a real error exists: rejecting an invalid input URL, and the internal
//! fetch path before degradation kicks in.

use thiserror::Error;

/// Errors surfaced to callers of the extraction API.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The submitted URL is empty, unparsable, or not http/https.
    #[error("invalid product URL: {url:?}")]
    InvalidUrl { url: String },
}

/// Errors from the read-through proxy fetch.
///
/// These never escape the extractors; they are logged and replaced with
/// sentinel values.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("proxy request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured deadline
    #[error("proxy request timed out for {url}")]
    Timeout { url: String },

    /// Proxy answered with a non-success status
    #[error("proxy returned HTTP {status}")]
    BadStatus { status: u16 },

    /// Proxy body was not the expected JSON envelope
    #[error("proxy envelope was not valid JSON: {0}")]
    BadEnvelope(#[from] serde_json::Error),

    /// Envelope parsed but carried no page contents
    #[error("proxy envelope missing page contents")]
    MissingContents,
}
