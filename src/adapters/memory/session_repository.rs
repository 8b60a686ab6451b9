//! In-memory implementation of SessionRepository.
//!
//! Used by the service when no database is configured and by the
//! integration tests. Sessions are keyed by id; token lookups scan.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, RecipientId, SessionId, Timestamp};
use crate::domain::session::{AccessToken, Session};
use crate::ports::{SessionFilter, SessionRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

fn newest_first(a: &Session, b: &Session) -> std::cmp::Ordering {
    b.created_at()
        .cmp(a.created_at())
        .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_token(&self, token: &AccessToken) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|s| s.access_token() == token)
            .cloned())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_many(&self, filter: &SessionFilter) -> Result<Vec<Session>, DomainError> {
        let now = Timestamp::now();
        let sessions = self.sessions.read().await;

        let mut matching: Vec<&Session> = sessions
            .values()
            .filter(|s| {
                filter
                    .recipient_id
                    .as_ref()
                    .map_or(true, |r| s.recipient_id() == r)
            })
            .filter(|s| !filter.only_valid || (!s.is_revoked() && !s.is_expired_at(&now)))
            .collect();
        matching.sort_by(|a, b| newest_first(a, b));

        let offset = usize::try_from(filter.offset()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(filter.page_size as usize)
            .cloned()
            .collect())
    }

    async fn find_last_by_recipient_id(
        &self,
        recipient_id: &RecipientId,
    ) -> Result<Option<Session>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .filter(|s| s.recipient_id() == recipient_id)
            .min_by(|a, b| newest_first(a, b))
            .cloned())
    }

    async fn create(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(session.id()) {
            return Err(DomainError::database(format!(
                "Session already exists: {}",
                session.id()
            )));
        }
        if sessions
            .values()
            .any(|s| s.access_token() == session.access_token())
        {
            return Err(DomainError::database("Access token already bound to a session"));
        }

        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn save(&self, session: &Session) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        let stored = sessions.get_mut(session.id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id()),
            )
        })?;

        // A revoked session is terminal, same as the SQL row guard.
        if stored.is_revoked() {
            return Err(DomainError::new(
                ErrorCode::SessionRevoked,
                format!("Session already revoked: {}", session.id()),
            ));
        }

        *stored = session.clone();
        Ok(())
    }

    async fn delete_expired_sessions(&self) -> Result<u64, DomainError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(&now));
        Ok((before - sessions.len()) as u64)
    }
}
