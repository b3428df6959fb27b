//! Login, OAuth callback, and logout endpoints.

use axum::{
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use diskrelay_oauth::{authorization_url, exchange_code, AuthError};

use crate::error::ServerError;
use crate::state::{session_id_from_jar, AppState, SESSION_COOKIE};

/// Query parameters of the OAuth callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code from the provider redirect.
    pub code: Option<String>,
}

/// GET /login - redirect to the provider authorize URL.
pub async fn login_handler(State(state): State<AppState>) -> Redirect {
    Redirect::to(&authorization_url(&state.config.oauth))
}

/// GET /oauth/callback - exchange the code and open a session.
///
/// A missing or empty `code` fails before any network call. On success the
/// caller gets a session cookie and lands on `/dashboard`.
pub async fn callback_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
) -> Result<(CookieJar, Redirect), ServerError> {
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or(AuthError::MissingCode)?;

    let token = exchange_code(&state.http, &state.config.oauth, &code).await?;

    // Reuse the caller's cookie id if one is already present
    let id = session_id_from_jar(&jar).unwrap_or_else(Uuid::new_v4);
    state.sessions.create(id, token).await;
    info!(session_id = %id, "login complete");

    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Redirect::to("/dashboard")))
}

/// GET /logout - destroy the session and drop the cookie. Idempotent.
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(id) = session_id_from_jar(&jar) {
        state.sessions.clear(id).await;
        info!(session_id = %id, "logged out");
    }

    let mut removal = Cookie::from(SESSION_COOKIE);
    removal.set_path("/");

    (jar.remove(removal), Redirect::to("/"))
}
