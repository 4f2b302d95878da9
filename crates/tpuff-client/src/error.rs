//! Client error types.

use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the Turbopuffer API.
///
/// A request timeout surfaces as `Http` with
/// [`reqwest::Error::is_timeout`] set.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether this error was caused by the per-request timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_timeout())
    }
}
