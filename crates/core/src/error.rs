//! Error types for the live comparison feed

use thiserror::Error;

/// Main error type for the live feed.
///
/// Only snapshot acquisition and configuration can fail. Reconciliation
/// itself is total over its inputs.
#[derive(Error, Debug)]
pub enum LiveError {
    #[error("HTTP request error: {0}")]
    Http(String),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for LiveError {
    fn from(e: reqwest::Error) -> Self {
        LiveError::Http(e.to_string())
    }
}

/// Result type alias for live feed operations
pub type LiveResult<T> = Result<T, LiveError>;
