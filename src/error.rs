//! Error types for cdnjs API operations.

use thiserror::Error;

/// Errors that can occur during cdnjs API operations.
#[derive(Debug, Error)]
pub enum CdnJsError {
    /// A required argument was empty.
    #[error("Invalid argument '{name}': value must not be empty")]
    InvalidArgument { name: &'static str },

    /// Attempted to modify a frozen value such as a request options preset.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// The caller's cancellation token fired before the call completed.
    #[error("Operation was cancelled")]
    Cancelled,

    /// The client was closed and its transport released.
    #[error("cdnjs client has been closed")]
    Disposed,

    /// API request failed.
    #[error("cdnjs API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

impl CdnJsError {
    /// Returns true if this error was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns the HTTP status code, if the server responded with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } => *status_code,
            Self::RateLimited { .. } => Some(429),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for cdnjs operations.
pub type Result<T> = core::result::Result<T, CdnJsError>;
