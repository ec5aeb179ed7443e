//! Accounts and the device sessions registered against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DeviceId;

/// One authenticated client instance tied to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSession {
    pub device_id: DeviceId,
    /// Caller-supplied label; not unique.
    pub device_name: String,
    pub login_time: DateTime<Utc>,
    /// User agent of the registering client, stored verbatim.
    #[serde(rename = "user_agent")]
    pub client_descriptor: String,
}

impl DeviceSession {
    pub fn new(device_name: String, client_descriptor: String, login_time: DateTime<Utc>) -> Self {
        Self {
            device_id: DeviceId::new(),
            device_name,
            login_time,
            client_descriptor,
        }
    }
}

/// Stored account record. Never serialized directly; responses go through
/// [`AccountView`] so the credential stays server-side.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    pub credential: String,
    /// Insertion order is recency order.
    pub devices: Vec<DeviceSession>,
}

impl Account {
    pub fn new(username: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            credential: credential.into(),
            devices: Vec::new(),
        }
    }

    pub fn has_device(&self, device_id: &DeviceId) -> bool {
        self.devices.iter().any(|d| &d.device_id == device_id)
    }
}

/// Public projection of an account returned by the device listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub username: String,
    pub devices: Vec<DeviceSession>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            username: account.username,
            devices: account.devices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_view_drops_credential() {
        let mut account = Account::new("alice", "s3cret");
        account.devices.push(DeviceSession::new(
            "laptop".into(),
            "curl/8.0".into(),
            Utc::now(),
        ));
        let json = serde_json::to_value(AccountView::from(account)).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["devices"].as_array().unwrap().len(), 1);
        assert!(json.get("credential").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn device_session_serializes_client_descriptor_as_user_agent() {
        let device = DeviceSession::new("phone".into(), "Mozilla/5.0".into(), Utc::now());
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(json["user_agent"], "Mozilla/5.0");
        assert_eq!(json["device_name"], "phone");
        assert_eq!(json["device_id"], device.device_id.to_string());
    }
}
