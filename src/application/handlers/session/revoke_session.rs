//! RevokeSessionHandler - Command handler for logout.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{
    CommandMetadata, DomainError, ErrorCode, EventEnvelope, RecipientId, SerializableDomainEvent,
};
use crate::domain::session::{Session, SessionError, SessionRevoked};
use crate::ports::SessionRepository;

use super::load_owned_session;

/// Command to revoke the caller's own session.
#[derive(Debug, Clone)]
pub struct RevokeSessionCommand {
    pub recipient_id: RecipientId,
    pub access_token: String,
}

/// Result of successful session revocation.
#[derive(Debug, Clone)]
pub struct RevokeSessionResult {
    pub session: Session,
    /// Events for the dispatcher; nothing has been published yet.
    pub events: Vec<EventEnvelope>,
}

/// Handler for revoking sessions.
pub struct RevokeSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl RevokeSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RevokeSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<RevokeSessionResult, SessionError> {
        // 1-3. Lookup, ownership, expiration
        let mut session =
            load_owned_session(self.repository.as_ref(), &cmd.access_token, &cmd.recipient_id)
                .await?;

        // 4. Transition (fails if already revoked)
        session.revoke()?;

        let event = SessionRevoked::from_session(&session).ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Revoked session has no revocation time")
        })?;
        let envelope = metadata.stamp(event.to_envelope()?);

        // 5. Persist
        self.repository.save(&session).await.map_err(|e| {
            warn!(session_id = %session.id(), error = %e, "Failed to persist revocation");
            SessionError::from(e)
        })?;

        info!(
            session_id = %session.id(),
            recipient_id = %session.recipient_id(),
            source = metadata.source(),
            "Session revoked"
        );

        Ok(RevokeSessionResult {
            session,
            events: vec![envelope],
        })
    }
}
