//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-process event bus and the session audit log
//! - `memory` - In-memory session store
//! - `postgres` - PostgreSQL session store
//! - `scheduler` - Background expired-session sweeper

pub mod events;
pub mod memory;
pub mod postgres;
pub mod scheduler;

pub use events::{InMemoryEventBus, SessionAuditLogger};
pub use memory::InMemorySessionRepository;
pub use postgres::PostgresSessionRepository;
pub use scheduler::{SessionSweeper, SessionSweeperConfig};
