//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod dispatcher;
pub mod handlers;

pub use dispatcher::EventDispatcher;
pub use handlers::{
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult,
    DeleteExpiredSessionsHandler, DeleteExpiredSessionsResult,
    GetLastSessionHandler, GetLastSessionQuery,
    ListSessionsHandler, ListSessionsQuery,
    RevokeSessionCommand, RevokeSessionHandler, RevokeSessionResult,
    ValidateSessionHandler, ValidateSessionQuery,
};
