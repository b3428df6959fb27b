//! Browsing and download endpoints.

use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use diskrelay_session::Access;
use diskrelay_disk::{filter_items, ResourceItem};

use crate::error::ServerError;
use crate::state::AppState;
use crate::views;

/// Query parameters shared by the browsing and download routes.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseQuery {
    pub public_key: Option<String>,
    pub path: Option<String>,
}

/// Form body of the dashboard filter POST.
#[derive(Debug, Default, Deserialize)]
pub struct BrowseForm {
    pub public_key: Option<String>,
    pub path: Option<String>,
    pub file_type: Option<String>,
}

/// GET / - unauthenticated landing view.
pub async fn index_handler() -> Html<String> {
    Html(views::landing())
}

/// GET /dashboard - browse a public resource.
pub async fn dashboard_get_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BrowseQuery>,
) -> Result<Response, ServerError> {
    dashboard(&state, &jar, query.public_key, query.path, None).await
}

/// POST /dashboard - browse with a MIME-prefix filter from the form.
pub async fn dashboard_post_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BrowseQuery>,
    Form(form): Form<BrowseForm>,
) -> Result<Response, ServerError> {
    // Form values win over query values where both are present
    let public_key = form.public_key.or(query.public_key);
    let path = form.path.or(query.path);
    let file_type = form.file_type.filter(|t| !t.is_empty());
    dashboard(&state, &jar, public_key, path, file_type).await
}

async fn dashboard(
    state: &AppState,
    jar: &CookieJar,
    public_key: Option<String>,
    path: Option<String>,
    file_type: Option<String>,
) -> Result<Response, ServerError> {
    let session = match state.access(jar).await {
        Access::Authorized(session) => session,
        Access::NeedsLogin => return Ok(Redirect::to("/login").into_response()),
    };

    // Without a public key there is nothing to list; show the landing view
    let Some(public_key) = public_key.filter(|k| !k.is_empty()) else {
        return Ok(Html(views::landing()).into_response());
    };

    let path = path.unwrap_or_default();
    let mut listing = state
        .disk
        .list(&session.access_token, &public_key, &path)
        .await?;

    attach_download_refs(&mut listing.items, &public_key);

    if let Some(prefix) = file_type {
        listing.items = filter_items(&listing.items, &prefix);
    }

    Ok(Html(views::listing(&listing, &public_key)).into_response())
}

/// Point each file entry at this gateway's own download route. The remote
/// API's raw download semantics are never exposed to the caller.
fn attach_download_refs(items: &mut [ResourceItem], public_key: &str) {
    for item in items.iter_mut().filter(|i| i.is_file()) {
        item.download_ref = Some(format!(
            "/download?public_key={}&path={}",
            urlencoding::encode(public_key),
            urlencoding::encode(&item.path),
        ));
    }
}

/// GET /download - resolve a download link and stream the bytes through.
///
/// Parameter validation fails before any outbound call; the resolve and
/// fetch steps stay strictly sequential.
pub async fn download_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<BrowseQuery>,
) -> Result<Response, ServerError> {
    let session = match state.access(&jar).await {
        Access::Authorized(session) => session,
        Access::NeedsLogin => return Ok(Redirect::to("/login").into_response()),
    };

    let public_key = query.public_key.unwrap_or_default();
    let path = query.path.unwrap_or_default();

    let (bytes, filename) = state
        .disk
        .download(&session.access_token, &public_key, &path)
        .await?;

    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', ""));
    let headers = [
        (header::CONTENT_TYPE, "application/octet-stream".to_string()),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, bytes).into_response())
}
