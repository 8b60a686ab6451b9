//! CreateSessionHandler - Command handler for issuing sessions at login.

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::SessionsConfig;
use crate::domain::foundation::{
    CommandMetadata, EventEnvelope, RecipientId, SerializableDomainEvent, Timestamp,
};
use crate::domain::session::{AccessToken, NewSession, Session, SessionCreated, SessionError};
use crate::ports::SessionRepository;

/// Command to issue a session for a freshly exchanged access token.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub recipient_id: RecipientId,
    pub access_token: String,
    /// Falls back to the configured default TTL when absent.
    pub expires_at: Option<Timestamp>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: Session,
    /// Events for the dispatcher; nothing has been published yet.
    pub events: Vec<EventEnvelope>,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn SessionRepository>,
    config: SessionsConfig,
}

impl CreateSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self::with_config(repository, SessionsConfig::default())
    }

    pub fn with_config(repository: Arc<dyn SessionRepository>, config: SessionsConfig) -> Self {
        Self { repository, config }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateSessionResult, SessionError> {
        // 1. Structurally validate the credential
        let access_token = AccessToken::new(&cmd.access_token).map_err(|e| {
            debug!(recipient_id = %cmd.recipient_id, "Rejected malformed access token");
            e
        })?;

        // 2. Build the aggregate (enforces expiration invariant)
        let now = Timestamp::now();
        let expires_at = cmd
            .expires_at
            .unwrap_or_else(|| self.config.default_expiry(now));
        let session = Session::create(
            NewSession::new(cmd.recipient_id, access_token, expires_at).with_created_at(now),
        )?;

        // 3. Prepare the event before writing so a serialization failure leaves no row behind
        let envelope = metadata.stamp(SessionCreated::from_session(&session).to_envelope()?);

        // 4. Persist
        self.repository.create(&session).await?;

        info!(
            session_id = %session.id(),
            recipient_id = %session.recipient_id(),
            expires_at = %session.expires_at(),
            source = metadata.source(),
            "Session created"
        );

        Ok(CreateSessionResult {
            session,
            events: vec![envelope],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::test_support::*;
    use crate::domain::foundation::ErrorCode;

    fn command(token: &str, expires_in: i64) -> CreateSessionCommand {
        CreateSessionCommand {
            recipient_id: recipient(OWNER),
            access_token: token.to_string(),
            expires_at: Some(Timestamp::now().plus_minutes(expires_in)),
        }
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new()
            .with_actor_id(OWNER)
            .with_correlation_id("test-correlation")
            .with_source("login")
    }

    #[tokio::test]
    async fn creates_and_persists_session() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo.clone());

        let result = handler.handle(command(TOKEN, 10), metadata()).await.unwrap();

        assert_eq!(repo.len(), 1);
        let stored = repo.get(result.session.id()).unwrap();
        assert_eq!(stored, result.session);
        assert!(stored.belongs_to(OWNER));
        assert!(stored.is_valid());
    }

    #[tokio::test]
    async fn missing_expiry_uses_configured_ttl() {
        let repo = Arc::new(MockSessionRepository::new());
        let config = SessionsConfig {
            default_ttl_minutes: 15,
            ..Default::default()
        };
        let handler = CreateSessionHandler::with_config(repo, config);
        let cmd = CreateSessionCommand {
            expires_at: None,
            ..command(TOKEN, 10)
        };

        let session = handler.handle(cmd, metadata()).await.unwrap().session;

        assert_eq!(
            session.expires_at(),
            &session.created_at().plus_minutes(15)
        );
    }

    #[tokio::test]
    async fn explicit_expiry_wins_over_default_ttl() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::with_config(repo, SessionsConfig::default());
        let cmd = command(TOKEN, 5);
        let expires_at = cmd.expires_at;

        let session = handler.handle(cmd, metadata()).await.unwrap().session;

        assert_eq!(Some(*session.expires_at()), expires_at);
    }

    #[tokio::test]
    async fn trims_token_before_storing() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo);

        let padded = format!("  {}  ", TOKEN);
        let result = handler.handle(command(&padded, 10), metadata()).await.unwrap();

        assert_eq!(result.session.access_token().as_str(), TOKEN);
    }

    #[tokio::test]
    async fn returns_session_created_event_without_publishing() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo);

        let result = handler.handle(command(TOKEN, 10), metadata()).await.unwrap();

        assert_eq!(result.events.len(), 1);
        let event = &result.events[0];
        assert_eq!(event.event_type, "session.created.v1");
        assert_eq!(event.aggregate_id, result.session.id().to_string());
        assert_eq!(event.metadata.correlation_id.as_deref(), Some("test-correlation"));
        assert_eq!(event.metadata.actor_id.as_deref(), Some(OWNER));
    }

    #[tokio::test]
    async fn rejects_malformed_token_without_writing() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo.clone());

        let result = handler.handle(command("not-a-token", 10), metadata()).await;

        assert!(matches!(result, Err(SessionError::InvalidAccessToken(_))));
        assert_eq!(*repo.create_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn rejects_expiration_in_the_past() {
        let repo = Arc::new(MockSessionRepository::new());
        let handler = CreateSessionHandler::new(repo.clone());

        let result = handler.handle(command(TOKEN, -1), metadata()).await;

        assert_eq!(result.unwrap_err(), SessionError::InvalidExpiration);
        assert_eq!(*repo.create_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn surfaces_repository_failure_as_unexpected() {
        let repo = Arc::new(MockSessionRepository::failing());
        let handler = CreateSessionHandler::new(repo);

        let err = handler
            .handle(command(TOKEN, 10), metadata())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::Unexpected(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
