//! Data models shared across the session core and API handlers.

pub mod account;
pub mod auth;
pub mod caller_session;

pub use account::{Account, AccountView, DeviceSession};
pub use caller_session::CallerSession;
