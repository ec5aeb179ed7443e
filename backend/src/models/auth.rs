//! Request and response bodies for the HTTP routes.

use serde::{Deserialize, Serialize};

use crate::models::account::DeviceSession;
use crate::types::DeviceId;

/// Missing fields deserialize as empty so the core reports them as
/// `MissingField` instead of the extractor rejecting the body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub device_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub device_id: DeviceId,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
    pub remaining_device: Vec<DeviceSession>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DevicesRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
}
