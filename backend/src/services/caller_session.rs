use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::models::caller_session::CallerSession;
use crate::types::{CallerSessionId, DeviceId};

/// Server-side caller sessions keyed by their opaque handle.
///
/// Expiry is checked lazily on every access; [`purge_expired`] exists for an
/// optional background sweep.
///
/// [`purge_expired`]: CallerSessionStore::purge_expired
pub struct CallerSessionStore {
    sessions: RwLock<HashMap<CallerSessionId, CallerSession>>,
    inactivity_timeout: Duration,
}

impl CallerSessionStore {
    pub fn new(inactivity_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            inactivity_timeout,
        }
    }

    pub async fn start(
        &self,
        username: &str,
        device_id: DeviceId,
        now: DateTime<Utc>,
    ) -> CallerSession {
        let session = CallerSession::new(username.to_string(), device_id, now);
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Returns the live session and slides its inactivity window forward.
    pub async fn resolve(&self, id: &CallerSessionId, now: DateTime<Utc>) -> Option<CallerSession> {
        let mut sessions = self.sessions.write().await;
        let expired = sessions
            .get(id)
            .map(|s| s.is_expired(now, self.inactivity_timeout))?;
        if expired {
            sessions.remove(id);
            tracing::debug!(session_id = %id, "Caller session expired");
            return None;
        }
        let session = sessions.get_mut(id)?;
        session.touch(now);
        Some(session.clone())
    }

    pub async fn end(&self, id: &CallerSessionId) -> Option<CallerSession> {
        self.sessions.write().await.remove(id)
    }

    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now, self.inactivity_timeout));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CallerSessionStore {
        CallerSessionStore::new(Duration::minutes(30))
    }

    #[tokio::test]
    async fn resolve_returns_started_session() {
        let store = store();
        let now = Utc::now();
        let device = DeviceId::new();
        let session = store.start("alice", device, now).await;

        let resolved = store.resolve(&session.id, now).await.unwrap();
        assert_eq!(resolved.username, "alice");
        assert_eq!(resolved.active_device_id, device);
    }

    #[tokio::test]
    async fn resolve_slides_the_window() {
        let store = store();
        let now = Utc::now();
        let session = store.start("alice", DeviceId::new(), now).await;

        assert!(store
            .resolve(&session.id, now + Duration::minutes(25))
            .await
            .is_some());
        assert!(store
            .resolve(&session.id, now + Duration::minutes(50))
            .await
            .is_some());
    }

    #[tokio::test]
    async fn expired_session_is_removed_on_access() {
        let store = store();
        let now = Utc::now();
        let session = store.start("alice", DeviceId::new(), now).await;

        assert!(store
            .resolve(&session.id, now + Duration::minutes(31))
            .await
            .is_none());
        assert!(store.is_empty().await);
        assert!(store.resolve(&session.id, now).await.is_none());
    }

    #[tokio::test]
    async fn end_removes_only_that_session() {
        let store = store();
        let now = Utc::now();
        let a = store.start("alice", DeviceId::new(), now).await;
        let b = store.start("alice", DeviceId::new(), now).await;

        assert_eq!(store.end(&a.id).await.map(|s| s.id), Some(a.id));
        assert!(store.end(&a.id).await.is_none());
        assert!(store.resolve(&b.id, now).await.is_some());
    }

    #[tokio::test]
    async fn purge_expired_keeps_live_sessions() {
        let store = store();
        let now = Utc::now();
        store.start("alice", DeviceId::new(), now).await;
        let fresh = store
            .start("bob", DeviceId::new(), now + Duration::minutes(20))
            .await;

        let removed = store.purge_expired(now + Duration::minutes(40)).await;
        assert_eq!(removed, 1);
        assert_eq!(store.len().await, 1);
        assert!(store
            .resolve(&fresh.id, now + Duration::minutes(40))
            .await
            .is_some());
    }
}
