//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `session` - Session aggregate, access tokens and lifecycle events

pub mod foundation;
pub mod session;
