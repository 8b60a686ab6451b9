//! DeleteExpiredSessionsHandler - Maintenance sweep that purges expired sessions.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::session::SessionError;
use crate::ports::SessionRepository;

/// Result of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteExpiredSessionsResult {
    pub purged: u64,
}

/// Handler for the expired-session sweep.
///
/// Runs on a schedule; a failed sweep is reported, never retried here.
pub struct DeleteExpiredSessionsHandler {
    repository: Arc<dyn SessionRepository>,
}

impl DeleteExpiredSessionsHandler {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<DeleteExpiredSessionsResult, SessionError> {
        let purged = self
            .repository
            .delete_expired_sessions()
            .await
            .map_err(|e| {
                error!(error = %e, "Expired session sweep failed");
                SessionError::unexpected(e.to_string())
            })?;

        info!(purged, "Expired sessions purged");
        Ok(DeleteExpiredSessionsResult { purged })
    }
}
