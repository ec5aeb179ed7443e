use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;

use super::SessionManager;

/// Periodically drops expired caller sessions. Expiry is enforced on access
/// regardless; this only bounds memory.
pub fn spawn_session_sweeper(sessions: Arc<SessionManager>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let deleted = sessions.purge_expired_sessions().await;
            if deleted > 0 {
                tracing::info!("Deleted {} expired caller sessions", deleted);
            }
        }
    })
}
