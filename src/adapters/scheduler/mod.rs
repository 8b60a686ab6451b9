//! Scheduled maintenance services.

mod session_sweeper;

pub use session_sweeper::{SessionSweeper, SessionSweeperConfig};
