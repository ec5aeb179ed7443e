use std::sync::Arc;

use crate::{
    config::Config,
    models::account::Account,
    repositories::{AccountStore, InMemoryAccountStore},
    services::{CallerSessionStore, SessionManager},
};

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub config: Config,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountStore>, config: Config) -> Self {
        let callers = CallerSessionStore::new(config.session_timeout);
        Self {
            sessions: Arc::new(SessionManager::new(accounts, callers)),
            config,
        }
    }

    /// In-memory state seeded with the configured test account, if any.
    pub async fn from_config(config: Config) -> Self {
        let store = InMemoryAccountStore::default();
        match &config.seed_password {
            Some(password) => {
                store
                    .insert(Account::new(config.seed_username.clone(), password.clone()))
                    .await;
            }
            None => tracing::warn!("TESTUSER_PASSWORD not set; starting without accounts"),
        }
        Self::new(Arc::new(store), config)
    }
}
