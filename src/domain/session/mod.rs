//! Session domain module.
//!
//! Handles the lifecycle of authenticated sessions: issuing a session for an
//! access token, checking ownership/expiration/revocation, and revoking.
//!
//! # Events
//!
//! - `SessionCreated` - Published when a session is issued
//! - `SessionRevoked` - Published when a session is revoked

mod access_token;
mod aggregate;
mod claims;
mod errors;
mod events;
mod status;

pub use access_token::AccessToken;
pub use aggregate::{NewSession, Session};
pub use claims::{ClaimValue, Claims};
pub use errors::SessionError;
pub use events::{SessionCreated, SessionRevoked};
pub use status::SessionStatus;
