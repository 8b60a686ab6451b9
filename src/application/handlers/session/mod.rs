//! Session command and query handlers.

mod create_session;
mod delete_expired_sessions;
mod get_last_session;
mod list_sessions;
mod revoke_session;
mod validate_session;

#[cfg(test)]
mod test_support;

pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use delete_expired_sessions::{DeleteExpiredSessionsHandler, DeleteExpiredSessionsResult};
pub use get_last_session::{GetLastSessionHandler, GetLastSessionQuery};
pub use list_sessions::{ListSessionsHandler, ListSessionsQuery};
pub use revoke_session::{RevokeSessionCommand, RevokeSessionHandler, RevokeSessionResult};
pub use validate_session::{ValidateSessionHandler, ValidateSessionQuery};

use crate::domain::foundation::{RecipientId, Timestamp};
use crate::domain::session::{AccessToken, Session, SessionError};
use crate::ports::SessionRepository;

/// Loads the session for a presented token and runs the checks shared by
/// validation and revocation, in this order:
///
/// 1. lookup (`NotFound`)
/// 2. ownership (`NotAllowed`)
/// 3. expiration (`Expired`)
///
/// Ownership comes before any state check so a caller holding someone
/// else's token learns nothing about that session.
pub(crate) async fn load_owned_session(
    repository: &dyn SessionRepository,
    raw_token: &str,
    recipient_id: &RecipientId,
) -> Result<Session, SessionError> {
    // A malformed token cannot be bound to any session.
    let token = AccessToken::new(raw_token).map_err(|_| SessionError::NotFound)?;

    let session = repository
        .find_by_token(&token)
        .await?
        .ok_or(SessionError::NotFound)?;

    if !session.belongs_to(recipient_id.as_str()) {
        return Err(SessionError::NotAllowed);
    }

    if session.is_expired_at(&Timestamp::now()) {
        return Err(SessionError::Expired);
    }

    Ok(session)
}
