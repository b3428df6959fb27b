//! Per-caller access-token sessions.
//!
//! A session binds one OAuth access token to one caller (identified by a
//! cookie) for a fixed 30-minute window measured from creation. Expiry is
//! lazy: an expired session is treated as absent on the next lookup and
//! removed then. Absence is never an error here — the boundary layer turns
//! it into a login redirect via [`Access`].

pub mod store;

pub use store::{MemoryStore, SessionStore};

use std::time::{Duration, Instant};

use uuid::Uuid;

/// Fixed session lifetime, measured from creation. Not configurable at
/// runtime.
pub const SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Opaque per-caller session identifier, carried in the session cookie.
pub type SessionId = Uuid;

/// An access token bound to a time-limited session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer credential for the remote storage API.
    pub access_token: String,

    /// Absolute expiry instant.
    pub expires_at: Instant,
}

impl Session {
    /// Create a session expiring [`SESSION_TTL`] from now.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Instant::now() + SESSION_TTL,
        }
    }

    /// Whether the session's window has elapsed.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    #[cfg(test)]
    pub(crate) fn with_ttl(access_token: impl Into<String>, ttl: Duration) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at: Instant::now() + ttl,
        }
    }
}

/// Outcome of a session lookup at an authenticated boundary.
///
/// A tagged result instead of an in-band redirect: the HTTP layer decides
/// what `NeedsLogin` becomes.
#[derive(Debug, Clone)]
pub enum Access {
    /// A live session exists; remote calls may proceed.
    Authorized(Session),

    /// No live session; the caller must be sent through the login flow.
    NeedsLogin,
}

impl Access {
    /// Get the session if authorized.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Access::Authorized(session) => Some(session),
            Access::NeedsLogin => None,
        }
    }
}
