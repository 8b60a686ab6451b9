//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionRepository` - Session persistence boundary
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` / `EventHandler` - Consumers of published events

mod event_publisher;
mod event_subscriber;
mod session_repository;

pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use session_repository::{SessionFilter, SessionRepository, MAX_PAGE_SIZE};
