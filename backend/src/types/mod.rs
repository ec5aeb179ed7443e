pub mod id;

pub use id::{CallerSessionId, DeviceId};
