//! Ephemeral per-caller session state.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::types::{CallerSessionId, DeviceId};

/// Links a transport-level session handle to the device most recently
/// registered from that caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerSession {
    pub id: CallerSessionId,
    pub username: String,
    pub active_device_id: DeviceId,
    pub last_seen_at: DateTime<Utc>,
}

impl CallerSession {
    pub fn new(username: String, active_device_id: DeviceId, now: DateTime<Utc>) -> Self {
        Self {
            id: CallerSessionId::new(),
            username,
            active_device_id,
            last_seen_at: now,
        }
    }

    /// Idle for strictly longer than `timeout`.
    pub fn is_expired(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.last_seen_at > timeout
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = now;
    }
}
