//! Session repository port.
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//!
//! # Consistency
//!
//! Implementations must give read-your-writes between `find_by_token` and a
//! following `save` on the same session. Preventing two concurrent revokes of
//! one session from both succeeding is the adapter's job (row guard or lock);
//! the domain only guards a single in-memory instance.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RecipientId, SessionId};
use crate::domain::session::{AccessToken, Session};

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Filter for paged session listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFilter {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub recipient_id: Option<RecipientId>,
    /// Only sessions that are neither revoked nor expired.
    pub only_valid: bool,
}

impl SessionFilter {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            recipient_id: None,
            only_valid: false,
        }
    }

    pub fn for_recipient(mut self, recipient_id: RecipientId) -> Self {
        self.recipient_id = Some(recipient_id);
        self
    }

    pub fn only_valid(mut self) -> Self {
        self.only_valid = true;
        self
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// Repository port for Session aggregate persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find the session bound to an access token.
    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<Session>, DomainError>;

    /// Find a session by its ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Page through sessions, newest first.
    async fn find_many(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError>;

    /// The most recently created session of a recipient.
    async fn find_last_by_recipient_id(
        &self,
        recipient_id: &RecipientId,
    ) -> Result<Option<Session>, DomainError>;

    /// Insert a new session.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure or duplicate id/token
    async fn create(&self, session: &Session) -> Result<(), DomainError>;

    /// Persist changes to an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `SessionRevoked` if a concurrent writer already revoked it
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &Session) -> Result<(), DomainError>;

    /// Purge every session whose expiration has passed.
    ///
    /// Returns the number of rows removed.
    async fn delete_expired_sessions(&self) -> Result<u64, DomainError>;
}
