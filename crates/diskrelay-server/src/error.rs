//! Error types for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use diskrelay_disk::ApiError;
use diskrelay_oauth::AuthError;

/// Server error type.
#[derive(Debug, Error)]
pub enum ServerError {
    /// OAuth flow failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Remote storage API failure.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ServerError {
    /// HTTP status and stable error code for this failure.
    ///
    /// Upstream 4xx means the caller's input was at fault; timeouts and
    /// upstream 5xx surface as gateway errors. The original made no such
    /// distinction; the split is diagnostic only — no retries either way.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::Auth(AuthError::MissingCode) => {
                (StatusCode::BAD_REQUEST, "missing_code")
            }
            ServerError::Auth(AuthError::TokenExchangeFailed { status, .. }) => {
                if (400..500).contains(status) {
                    (StatusCode::BAD_REQUEST, "token_exchange_failed")
                } else {
                    (StatusCode::BAD_GATEWAY, "token_exchange_failed")
                }
            }
            ServerError::Auth(AuthError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, "provider_timeout")
            }
            ServerError::Auth(AuthError::Network(_)) => {
                (StatusCode::BAD_GATEWAY, "provider_unreachable")
            }
            ServerError::Api(ApiError::InvalidRequest(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_request")
            }
            ServerError::Api(ApiError::Upstream { status, .. }) => {
                if (400..500).contains(status) {
                    (StatusCode::BAD_REQUEST, "upstream_rejected")
                } else {
                    (StatusCode::BAD_GATEWAY, "upstream_error")
                }
            }
            ServerError::Api(ApiError::NoDownloadLink) => {
                (StatusCode::BAD_GATEWAY, "no_download_link")
            }
            ServerError::Api(ApiError::DownloadFailed(status)) => {
                if (400..500).contains(status) {
                    (StatusCode::BAD_REQUEST, "download_failed")
                } else {
                    (StatusCode::BAD_GATEWAY, "download_failed")
                }
            }
            ServerError::Api(ApiError::Timeout) => {
                (StatusCode::GATEWAY_TIMEOUT, "upstream_timeout")
            }
            ServerError::Api(ApiError::Network(_)) => {
                (StatusCode::BAD_GATEWAY, "upstream_unreachable")
            }
            ServerError::Api(ApiError::InvalidUrl(_)) | ServerError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %message, "gateway error");
        } else {
            tracing::warn!(status = %status, code, error = %message, "request error");
        }

        let body = ErrorResponse {
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
