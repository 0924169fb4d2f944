//! Error types for hours extraction.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single call to an extraction collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CollaboratorError {
    /// Connection-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete in time.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// HTTP 429.
    #[error("rate limited{}", .retry_after.map(|d| format!(", retry after {}s", d.as_secs())).unwrap_or_default())]
    RateLimited { retry_after: Option<Duration> },

    /// HTTP 5xx.
    #[error("server error {status}: {body}")]
    Server { status: u16, body: String },

    /// Any other non-success HTTP status.
    #[error("request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response could not be read as RawFacts.
    #[error("unparseable response: {0}")]
    Unparseable(String),

    /// Missing credentials or an invalid endpoint.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl CollaboratorError {
    /// Returns whether a retry could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout(_) | Self::RateLimited { .. } | Self::Server { .. }
        )
    }

    /// Server-requested delay before the next request, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CollaboratorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Unparseable(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CollaboratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unparseable(err.to_string())
    }
}

/// Extraction failed for one program after all permitted attempts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("extraction failed for program '{program_id}' after {attempts} attempt(s): {cause}")]
pub struct ExtractionError {
    pub program_id: String,
    pub attempts: u32,
    #[source]
    pub cause: CollaboratorError,
}
