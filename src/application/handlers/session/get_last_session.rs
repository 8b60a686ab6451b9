//! GetLastSessionHandler - Query handler for a recipient's latest session.

use std::sync::Arc;

use crate::domain::foundation::RecipientId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionRepository;

/// Query for the most recently issued session of a recipient.
#[derive(Debug, Clone)]
pub struct GetLastSessionQuery {
    pub recipient_id: RecipientId,
}

/// Handler for fetching the latest session, e.g. to show "last sign-in".
pub struct GetLastSessionHandler {
    repository: Arc<dyn SessionRepository>,
}

impl GetLastSessionHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetLastSessionQuery) -> Result<Session, SessionError> {
        self.repository
            .find_last_by_recipient_id(&query.recipient_id)
            .await?
            .ok_or(SessionError::NoSessionForRecipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::test_support::*;

    #[tokio::test]
    async fn returns_most_recent_session() {
        let repo = Arc::new(MockSessionRepository::new());
        let newest = session_for(OWNER, "n.e.w", 1, 10);
        repo.create(&session_for(OWNER, "o.l.d", 30, 10)).await.unwrap();
        repo.create(&newest).await.unwrap();
        repo.create(&session_for(OTHER, "o.t.h", 0, 10)).await.unwrap();
        let handler = GetLastSessionHandler::new(repo);

        let session = handler
            .handle(GetLastSessionQuery {
                recipient_id: recipient(OWNER),
            })
            .await
            .unwrap();

        assert_eq!(session.id(), newest.id());
    }

    #[tokio::test]
    async fn recipient_without_sessions_is_reported() {
        let handler = GetLastSessionHandler::new(Arc::new(MockSessionRepository::new()));
        let result = handler
            .handle(GetLastSessionQuery {
                recipient_id: recipient(OWNER),
            })
            .await;
        assert_eq!(result.unwrap_err(), SessionError::NoSessionForRecipient);
    }
}
