//! Session store trait and the in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Session, SessionId};

/// Store of per-caller sessions.
///
/// The trait keeps the store substitutable (in-memory map, signed-cookie
/// codec, external cache) without touching call sites.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for the given id, replacing any existing one.
    async fn create(&self, id: SessionId, access_token: String) -> Session;

    /// Get the caller's session if present and not expired.
    ///
    /// An expired session counts as absent and is removed on this lookup.
    async fn get(&self, id: SessionId) -> Option<Session>;

    /// Destroy the session immediately. Idempotent.
    async fn clear(&self, id: SessionId);
}

/// In-memory session store.
///
/// One caller holds at most one session, so no background sweep is needed;
/// lazy expiry on `get` is enough.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live or not-yet-collected sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    #[cfg(test)]
    pub(crate) async fn insert_raw(&self, id: SessionId, session: Session) {
        self.sessions.write().await.insert(id, session);
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(&self, id: SessionId, access_token: String) -> Session {
        let session = Session::new(access_token);
        self.sessions.write().await.insert(id, session.clone());
        debug!(session_id = %id, "session created");
        session
    }

    async fn get(&self, id: SessionId) -> Option<Session> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                Some(session) if !session.is_expired() => return Some(session.clone()),
                None => return None,
                Some(_) => {} // expired, fall through to remove
            }
        }

        self.sessions.write().await.remove(&id);
        debug!(session_id = %id, "expired session collected");
        None
    }

    async fn clear(&self, id: SessionId) {
        if self.sessions.write().await.remove(&id).is_some() {
            debug!(session_id = %id, "session cleared");
        }
    }
}
