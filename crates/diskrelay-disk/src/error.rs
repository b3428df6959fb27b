//! Disk API error types.

use thiserror::Error;

/// Result type for Disk API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors from the remote storage API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter was missing or empty. Raised before any
    /// outbound call.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The API answered with a non-200 status.
    #[error("upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// The download-link endpoint did not yield an href.
    #[error("no download link available")]
    NoDownloadLink,

    /// The pre-signed href fetch answered with a non-200 status.
    #[error("download failed (status {0})")]
    DownloadFailed(u16),

    /// An outbound call exceeded the bounded timeout.
    #[error("upstream request timed out")]
    Timeout,

    /// Network/HTTP error before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// Base URL parsing failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Caller/input error: the request itself is at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ApiError::InvalidRequest(_))
            || matches!(self, ApiError::Upstream { status, .. } if (400..500).contains(status))
    }

    /// Timeout or 5xx: the upstream is unavailable and the caller may try
    /// again later. No automatic retries are performed.
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, ApiError::Timeout)
            || matches!(self, ApiError::Upstream { status, .. } if *status >= 500)
            || matches!(self, ApiError::DownloadFailed(status) if *status >= 500)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
