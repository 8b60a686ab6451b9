//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Synchronous, in-process bus
//! - `SessionAuditLogger` - Handler writing session events to the audit log

mod audit_log;
mod in_memory;

pub use audit_log::SessionAuditLogger;
pub use in_memory::InMemoryEventBus;
