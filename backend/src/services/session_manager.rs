//! Authentication and device-session lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::error::AuthError;
use crate::models::account::{AccountView, DeviceSession};
use crate::models::caller_session::CallerSession;
use crate::repositories::AccountStore;
use crate::services::caller_session::CallerSessionStore;
use crate::types::CallerSessionId;

/// Result of a successful login: the stored device plus the caller session
/// now bound to it.
#[derive(Debug, Clone)]
pub struct Registration {
    pub device: DeviceSession,
    pub session: CallerSession,
}

pub struct SessionManager {
    accounts: Arc<dyn AccountStore>,
    callers: CallerSessionStore,
    /// Serializes device-list mutations so a collapse never races an append.
    mutations: Mutex<()>,
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}

impl SessionManager {
    pub fn new(accounts: Arc<dyn AccountStore>, callers: CallerSessionStore) -> Self {
        Self {
            accounts,
            callers,
            mutations: Mutex::new(()),
        }
    }

    pub fn callers(&self) -> &CallerSessionStore {
        &self.callers
    }

    pub async fn authenticate_and_register(
        &self,
        username: &str,
        credential: &str,
        device_name: &str,
        client_descriptor: &str,
        current: Option<&CallerSessionId>,
    ) -> Result<Registration, AuthError> {
        self.authenticate_and_register_at(
            username,
            credential,
            device_name,
            client_descriptor,
            current,
            Utc::now(),
        )
        .await
    }

    /// Same as [`authenticate_and_register`](Self::authenticate_and_register)
    /// with an explicit clock.
    pub async fn authenticate_and_register_at(
        &self,
        username: &str,
        credential: &str,
        device_name: &str,
        client_descriptor: &str,
        current: Option<&CallerSessionId>,
        now: DateTime<Utc>,
    ) -> Result<Registration, AuthError> {
        require(username, "username")?;
        require(credential, "password")?;
        require(device_name, "device_name")?;
        require(client_descriptor, "user_agent")?;

        if !self.accounts.credential_matches(username, credential).await {
            tracing::warn!(username, "Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let device = DeviceSession::new(
            device_name.to_string(),
            client_descriptor.to_string(),
            now,
        );
        {
            let _guard = self.mutations.lock().await;
            self.accounts.append_device(username, device.clone()).await?;
        }

        // A caller that logs in again is rebound to the new device.
        if let Some(previous) = current {
            if self.callers.end(previous).await.is_some() {
                tracing::debug!(session_id = %previous, "Replaced caller session");
            }
        }
        let session = self.callers.start(username, device.device_id, now).await;

        tracing::info!(
            username,
            device_id = %device.device_id,
            device_name = %device.device_name,
            "Registered device"
        );

        Ok(Registration { device, session })
    }

    pub async fn logout_collapse(
        &self,
        current: Option<&CallerSessionId>,
    ) -> Result<Vec<DeviceSession>, AuthError> {
        self.logout_collapse_at(current, Utc::now()).await
    }

    /// Keeps only the device bound to the caller's session and ends that
    /// session. An empty result means the bound device was already gone.
    pub async fn logout_collapse_at(
        &self,
        current: Option<&CallerSessionId>,
        now: DateTime<Utc>,
    ) -> Result<Vec<DeviceSession>, AuthError> {
        let id = current.ok_or(AuthError::NoActiveSession)?;
        let session = self
            .callers
            .resolve(id, now)
            .await
            .ok_or(AuthError::NoActiveSession)?;

        let remaining = {
            let _guard = self.mutations.lock().await;
            let account = self
                .accounts
                .get(&session.username)
                .await
                .ok_or(AuthError::NotFound)?;
            let remaining: Vec<DeviceSession> = account
                .devices
                .into_iter()
                .filter(|d| d.device_id == session.active_device_id)
                .collect();
            self.accounts
                .replace_devices(&session.username, remaining.clone())
                .await?;
            remaining
        };

        self.callers.end(id).await;

        if remaining.is_empty() {
            tracing::warn!(
                username = %session.username,
                device_id = %session.active_device_id,
                "Active device missing during logout; no devices remain"
            );
        }
        tracing::info!(
            username = %session.username,
            remaining = remaining.len(),
            "Collapsed devices to current session"
        );

        Ok(remaining)
    }

    pub async fn list_devices(&self, username: &str) -> Result<AccountView, AuthError> {
        require(username, "username")?;
        let account = self
            .accounts
            .get(username)
            .await
            .ok_or(AuthError::NotFound)?;
        Ok(account.into())
    }

    pub async fn purge_expired_sessions(&self) -> usize {
        self.callers.purge_expired(Utc::now()).await
    }
}
