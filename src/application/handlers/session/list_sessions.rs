//! ListSessionsHandler - Query handler for paged session listings.

use std::sync::Arc;

use crate::domain::foundation::RecipientId;
use crate::domain::session::{Session, SessionError};
use crate::ports::{SessionFilter, SessionRepository, MAX_PAGE_SIZE};

/// Query for a page of sessions, optionally scoped to one recipient.
#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    pub recipient_id: Option<RecipientId>,
    pub only_valid: bool,
}

impl Default for ListSessionsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            recipient_id: None,
            only_valid: false,
        }
    }
}

/// Handler for listing sessions.
pub struct ListSessionsHandler {
    repository: Arc<dyn SessionRepository>,
}

impl ListSessionsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// - `InvalidFilter` if `page` is 0
    pub async fn handle(&self, query: ListSessionsQuery) -> Result<Vec<Session>, SessionError> {
        if query.page == 0 {
            return Err(SessionError::invalid_filter("page must start at 1"));
        }

        let filter = SessionFilter {
            page: query.page,
            page_size: query.page_size.clamp(1, MAX_PAGE_SIZE),
            recipient_id: query.recipient_id,
            only_valid: query.only_valid,
        };

        Ok(self.repository.find_many(&filter).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::session::test_support::*;

    async fn seeded() -> Arc<MockSessionRepository> {
        let repo = Arc::new(MockSessionRepository::new());
        for (i, owner) in [OWNER, OWNER, OTHER].iter().enumerate() {
            let token = format!("t{i}.p.s");
            repo.create(&session_for(owner, &token, 0, 10)).await.unwrap();
        }
        repo.create(&session_for(OWNER, "x.y.z", 10, -5)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn lists_all_sessions_by_default() {
        let handler = ListSessionsHandler::new(seeded().await);
        let sessions = handler.handle(ListSessionsQuery::default()).await.unwrap();
        assert_eq!(sessions.len(), 4);
    }

    #[tokio::test]
    async fn scopes_to_recipient_and_validity() {
        let handler = ListSessionsHandler::new(seeded().await);

        let sessions = handler
            .handle(ListSessionsQuery {
                recipient_id: Some(recipient(OWNER)),
                only_valid: true,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(sessions.len(), 2);
        assert!(sessions.iter().all(|s| s.belongs_to(OWNER) && s.is_valid()));
    }

    #[tokio::test]
    async fn pages_through_results() {
        let handler = ListSessionsHandler::new(seeded().await);

        let second = handler
            .handle(ListSessionsQuery {
                page: 2,
                page_size: 3,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn zero_page_size_is_clamped() {
        let handler = ListSessionsHandler::new(seeded().await);
        let sessions = handler
            .handle(ListSessionsQuery {
                page_size: 0,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn page_zero_is_rejected() {
        let handler = ListSessionsHandler::new(seeded().await);
        let result = handler
            .handle(ListSessionsQuery {
                page: 0,
                ..Default::default()
            })
            .await;
        assert!(matches!(result, Err(SessionError::InvalidFilter(_))));
    }
}
