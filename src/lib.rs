//! Backoffice Sessions - Session lifecycle for the multi-tenant back office.
//!
//! Issues server-side sessions bound to bearer access tokens, validates them
//! against ownership, expiration and revocation rules, revokes them on
//! logout, and sweeps expired ones on a schedule.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
