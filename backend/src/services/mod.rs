pub mod caller_session;
pub mod session_manager;
pub mod sweeper;

pub use caller_session::CallerSessionStore;
pub use session_manager::{Registration, SessionManager};
pub use sweeper::spawn_session_sweeper;
