//! Account storage.
//!
//! The session core only talks to [`AccountStore`], so a durable backend can
//! replace [`InMemoryAccountStore`] without touching the session logic.

use std::collections::HashMap;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::account::{Account, DeviceSession};

#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn get(&self, username: &str) -> Option<Account>;

    async fn credential_matches(&self, username: &str, candidate: &str) -> bool;

    /// Appends to the end of the device list; order is recency.
    async fn append_device(&self, username: &str, device: DeviceSession)
        -> Result<(), StoreError>;

    /// Replaces the whole device list in one step.
    async fn replace_devices(
        &self,
        username: &str,
        devices: Vec<DeviceSession>,
    ) -> Result<(), StoreError>;
}

/// Process-lifetime store. Every mutation holds the write guard for its whole
/// read-modify-write, so concurrent appends to one account are never lost.
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.username.clone(), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Seeds or overwrites an account record.
    pub async fn insert(&self, account: Account) {
        tracing::info!(username = %account.username, "Seeding account");
        self.accounts
            .write()
            .await
            .insert(account.username.clone(), account);
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, username: &str) -> Option<Account> {
        self.accounts.read().await.get(username).cloned()
    }

    async fn credential_matches(&self, username: &str, candidate: &str) -> bool {
        let accounts = self.accounts.read().await;
        match accounts.get(username) {
            Some(account) => digest(&account.credential) == digest(candidate),
            None => false,
        }
    }

    async fn append_device(
        &self,
        username: &str,
        device: DeviceSession,
    ) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
        if account.has_device(&device.device_id) {
            return Err(StoreError::DuplicateDevice {
                username: username.to_string(),
                device_id: device.device_id,
            });
        }
        account.devices.push(device);
        Ok(())
    }

    async fn replace_devices(
        &self,
        username: &str,
        devices: Vec<DeviceSession>,
    ) -> Result<(), StoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(username)
            .ok_or_else(|| StoreError::NotFound(username.to_string()))?;
        account.devices = devices;
        Ok(())
    }
}
