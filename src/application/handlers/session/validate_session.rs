//! ValidateSessionHandler - Query handler run on every authenticated request.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::RecipientId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

use super::load_owned_session;

/// Query to check that a presented token still authenticates its owner.
#[derive(Debug, Clone)]
pub struct ValidateSessionQuery {
    pub access_token: String,
    pub recipient_id: RecipientId,
}

/// Handler for validating sessions. Read-only.
pub struct ValidateSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl ValidateSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ValidateSessionQuery) -> Result<Session, SessionError> {
        let result = self.check(&query).await;
        if let Err(err) = &result {
            debug!(recipient_id = %query.recipient_id, error = %err, "Session validation failed");
        }
        result
    }

    async fn check(&self, query: &ValidateSessionQuery) -> Result<Session, SessionError> {
        // Lookup, ownership, expiration
        let session =
            load_owned_session(self.repository.as_ref(), &query.access_token, &query.recipient_id)
                .await?;

        // Revocation
        if session.is_revoked() {
            return Err(SessionError::AlreadyRevoked);
        }

        Ok(session)
    }
}
