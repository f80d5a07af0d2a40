//! Error types for the race feed.
//!
//! All failures a feed can hit are variants of [`FeedError`]. The taxonomy is
//! deliberately small: transport failures, non-success HTTP statuses, body
//! decode failures, and configuration problems. Transient network errors are
//! classified as retryable via [`FeedError::is_retryable`]; a running feed
//! never treats any of them as fatal (it keeps the last good race list and
//! tries again at the next refetch deadline).

use thiserror::Error;

/// Result type alias for feed operations.
pub type Result<T, E = FeedError> = std::result::Result<T, E>;

/// Main error type for feed operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FeedError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed response body from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid feed configuration: {reason}")]
    Config { reason: String },
}

impl FeedError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedError::Request { .. } => true,
            // Server-side trouble may clear up; client-side statuses won't.
            FeedError::Status { status, .. } => *status >= 500,
            FeedError::Decode { .. } => false,
            FeedError::Config { .. } => false,
        }
    }

    /// Helper constructor for transport failures.
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        FeedError::Request { url: url.into(), source }
    }

    /// Helper constructor for non-success HTTP responses.
    pub fn status(status: u16, url: impl Into<String>) -> Self {
        FeedError::Status { status, url: url.into() }
    }

    /// Helper constructor for body decode failures.
    pub fn decode(url: impl Into<String>, source: reqwest::Error) -> Self {
        FeedError::Decode { url: url.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        FeedError::Config { reason: reason.into() }
    }
}
