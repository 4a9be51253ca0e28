//! Session storage implementation
//!
//! In-memory store for admin console sessions, one per operator, behind a
//! trait so the backing can be swapped without touching call sites.
//! Sessions expire after an inactivity TTL and the map is bounded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::Duration;
use tracing::{debug, warn};
use super::session::AdminSession;

/// Storage interface for operator sessions
pub trait SessionStore: Send + Sync {
    /// Load a live session; expired sessions are dropped and not returned
    fn load(&self, admin_id: i64) -> Option<AdminSession>;
    /// Persist a session, refreshing its inactivity clock
    fn save(&self, session: AdminSession);
    /// Destroy a session; returns whether one existed
    fn remove(&self, admin_id: i64) -> bool;
    /// Number of live sessions
    fn active_count(&self) -> usize;
}

/// Bounded in-memory session store
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<i64, AdminSession>>,
    ttl: Duration,
    max_sessions: usize,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            max_sessions,
        }
    }

    /// Shared handle with the default one-hour inactivity TTL
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new(Duration::hours(1), 256))
    }

    /// Drop every expired session; returns removed count
    pub fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(self.ttl));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!(removed = removed, "Expired console sessions dropped");
        }
        removed
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, admin_id: i64) -> Option<AdminSession> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.get(&admin_id) {
            Some(session) if session.is_expired(self.ttl) => {
                sessions.remove(&admin_id);
                debug!(admin_id = admin_id, "Console session expired");
                None
            }
            Some(session) => Some(session.clone()),
            None => None,
        }
    }

    fn save(&self, mut session: AdminSession) {
        session.touch();
        let mut sessions = self.sessions.lock().unwrap();

        // Bound the map: evict the most stale session when full
        if sessions.len() >= self.max_sessions && !sessions.contains_key(&session.admin_id) {
            if let Some(stalest) = sessions
                .values()
                .min_by_key(|existing| existing.updated_at)
                .map(|existing| existing.admin_id)
            {
                sessions.remove(&stalest);
                warn!(evicted = stalest, "Session store full, evicted stalest session");
            }
        }

        sessions.insert(session.admin_id, session);
    }

    fn remove(&self, admin_id: i64) -> bool {
        self.sessions.lock().unwrap().remove(&admin_id).is_some()
    }

    fn active_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl std::fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .field("ttl", &self.ttl)
            .field("max_sessions", &self.max_sessions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_save_load_remove() {
        let store = InMemorySessionStore::new(Duration::hours(1), 8);

        store.save(AdminSession::new(42, -100));
        let loaded = store.load(42).unwrap();
        assert_eq!(loaded.admin_id, 42);
        assert_eq!(loaded.chat_id, -100);

        assert!(store.remove(42));
        assert!(!store.remove(42));
        assert!(store.load(42).is_none());
    }

    #[test]
    fn test_expired_session_not_returned() {
        let store = InMemorySessionStore::new(Duration::hours(1), 8);

        let mut session = AdminSession::new(7, 7);
        store.save(session.clone());

        // Force staleness past the TTL
        session.updated_at = Utc::now() - Duration::hours(2);
        store.sessions.lock().unwrap().insert(7, session);

        assert!(store.load(7).is_none());
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn test_bounded_eviction() {
        let store = InMemorySessionStore::new(Duration::hours(1), 2);

        store.save(AdminSession::new(1, 1));
        store.save(AdminSession::new(2, 2));
        store.save(AdminSession::new(3, 3));

        assert_eq!(store.active_count(), 2);
        assert!(store.load(3).is_some());
    }

    #[test]
    fn test_cleanup_expired() {
        let store = InMemorySessionStore::new(Duration::hours(1), 8);

        let mut stale = AdminSession::new(1, 1);
        stale.updated_at = Utc::now() - Duration::hours(2);
        store.sessions.lock().unwrap().insert(1, stale);
        store.save(AdminSession::new(2, 2));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.active_count(), 1);
    }
}
