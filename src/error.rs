//! Error types for catalog access
//!
//! Every failure is normalized into a [`CatalogError`] at the HTTP boundary and
//! forwarded unchanged by the layers above it.

use thiserror::Error;

/// Unified error type for catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (network error, DNS, connection reset, etc.)
    #[error("HTTP request error: {}", with_sources(.0))]
    Transport(#[from] reqwest::Error),
    /// Server answered with a non-success status other than 404
    #[error("HTTP request error: {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    /// Resource absent, null body or empty result set
    #[error("{0}")]
    NotFound(String),
    /// Body could not be deserialized into the expected record
    #[error("Unexpected error: {0}")]
    Data(#[from] serde_json::Error),
    /// Deadline elapsed before the response arrived
    #[error("Request cancelled: deadline elapsed for {0}")]
    Cancelled(String),
    /// Blank or otherwise unusable query
    #[error("{0}")]
    InvalidInput(String),
}

impl CatalogError {
    /// Human-readable message shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

/// Renders an error followed by its chain of causes, `outer: inner: root`.
fn with_sources(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

/// Result alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
