//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod session;

pub use session::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    DeleteExpiredSessionsHandler, DeleteExpiredSessionsResult,
    GetLastSessionHandler, GetLastSessionQuery,
    ListSessionsHandler, ListSessionsQuery,
    RevokeSessionCommand, RevokeSessionHandler, RevokeSessionResult,
    ValidateSessionHandler, ValidateSessionQuery,
};
