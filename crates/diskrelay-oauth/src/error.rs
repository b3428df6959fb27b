//! Error types for the OAuth flow.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during the authorization-code flow.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The callback arrived without a `code` parameter.
    #[error("missing authorization code")]
    MissingCode,

    /// The token endpoint rejected the exchange or returned a body
    /// without an access token.
    #[error("token exchange failed (status {status}): {body}")]
    TokenExchangeFailed { status: u16, body: String },

    /// The token endpoint did not answer within the bounded timeout.
    #[error("token exchange timed out")]
    Timeout,

    /// Network/HTTP error before a response was received.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AuthError::Timeout
        } else {
            AuthError::Network(e.to_string())
        }
    }
}
