//! Client error types

use thiserror::Error;

/// Client error type
///
/// Every variant ends up as a single line in a view's status region; the
/// client does not distinguish retryable from terminal failures.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not complete (connection refused, DNS, timeout)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    ///
    /// `message` is the body's `error` field, or `HTTP <status>: <reason>`.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Form input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// 2xx body that does not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Session storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the failure happened locally, before any request
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
