//! Application state shared across handlers.

use std::sync::Arc;

use axum_extra::extract::cookie::CookieJar;
use tracing::debug;
use uuid::Uuid;

use diskrelay_config::Config;
use diskrelay_disk::DiskClient;
use diskrelay_session::{Access, MemoryStore, SessionId, SessionStore};

use crate::error::Result;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "diskrelay_session";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable gateway configuration.
    pub config: Arc<Config>,

    /// Per-caller session store.
    pub sessions: Arc<dyn SessionStore>,

    /// Remote storage API client.
    pub disk: DiskClient,

    /// HTTP client for the OAuth token exchange.
    pub http: reqwest::Client,
}

impl AppState {
    /// Create application state with the default in-memory session store.
    pub fn new(config: Config) -> Result<Self> {
        let disk = DiskClient::new(&config.disk.api_base)?;
        Ok(Self {
            config: Arc::new(config),
            sessions: Arc::new(MemoryStore::new()),
            disk,
            http: reqwest::Client::new(),
        })
    }

    /// Swap in a different session store implementation.
    pub fn with_sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    /// Resolve the caller's session from the cookie jar.
    ///
    /// Absent cookie, unparseable cookie, and expired session all come back
    /// as [`Access::NeedsLogin`] — never as an error. No upstream call is
    /// made on that path.
    pub async fn access(&self, jar: &CookieJar) -> Access {
        let Some(id) = session_id_from_jar(jar) else {
            return Access::NeedsLogin;
        };

        match self.sessions.get(id).await {
            Some(session) => Access::Authorized(session),
            None => {
                debug!(session_id = %id, "no live session for cookie");
                Access::NeedsLogin
            }
        }
    }
}

/// Parse the session id out of the cookie jar, if any.
pub fn session_id_from_jar(jar: &CookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}
