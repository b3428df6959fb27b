//! OAuth 2.0 authorization-code flow against the Yandex provider.
//!
//! Two operations: building the provider authorize URL (pure, no I/O) and
//! exchanging a callback code for an access token (one form-encoded POST
//! with a bounded timeout).

pub mod error;

pub use error::{AuthError, Result};

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use diskrelay_config::OauthConfig;

/// Timeout for the token exchange request.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the provider authorize URL for the login redirect.
///
/// Deterministic; carries exactly one `client_id` and one `redirect_uri`,
/// and always `response_type=code`.
pub fn authorization_url(config: &OauthConfig) -> String {
    let params = [
        ("response_type", "code"),
        ("client_id", &config.client_id),
        ("redirect_uri", &config.redirect_uri),
    ];

    let query = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", config.authorize_url, query)
}

/// Token endpoint response body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange an authorization code for an access token.
///
/// Issues a form-encoded POST to the token endpoint. Any non-200 response,
/// or a 200 whose body lacks `access_token`, fails with
/// [`AuthError::TokenExchangeFailed`] carrying the upstream status and body
/// for diagnostics. Callers must reject an absent code as
/// [`AuthError::MissingCode`] before calling this.
pub async fn exchange_code(
    http: &reqwest::Client,
    config: &OauthConfig,
    code: &str,
) -> Result<String> {
    exchange_code_with_timeout(http, config, code, EXCHANGE_TIMEOUT).await
}

/// [`exchange_code`] with an explicit request timeout.
///
/// A provider that stalls past the deadline fails as [`AuthError::Timeout`]
/// rather than hanging the caller.
pub async fn exchange_code_with_timeout(
    http: &reqwest::Client,
    config: &OauthConfig,
    code: &str,
    timeout: Duration,
) -> Result<String> {
    let form = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", &config.client_id),
        ("client_secret", &config.client_secret),
        ("redirect_uri", &config.redirect_uri),
    ];

    let response = http
        .post(&config.token_url)
        .form(&form)
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if !status.is_success() {
        warn!(status = status.as_u16(), "token exchange rejected");
        return Err(AuthError::TokenExchangeFailed {
            status: status.as_u16(),
            body,
        });
    }

    match serde_json::from_str::<TokenResponse>(&body) {
        Ok(token) => {
            debug!("token exchange succeeded");
            Ok(token.access_token)
        }
        Err(_) => Err(AuthError::TokenExchangeFailed {
            status: status.as_u16(),
            body,
        }),
    }
}
