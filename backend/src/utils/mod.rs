pub mod cookies;
pub mod time;

pub use cookies::*;
pub use time::*;
