//! Session domain events.
//!
//! - `SessionCreated` - a session was issued for an access token
//! - `SessionRevoked` - a session was revoked before its natural expiry
//!
//! Neither event carries the access token itself.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EventId, RecipientId, SessionId, Timestamp};

use super::Session;

// ════════════════════════════════════════════════════════════════════════════
// SessionCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new session is issued.
///
/// Notification consumers use this to send "new sign-in" emails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreated {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub recipient_id: RecipientId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

domain_event!(
    SessionCreated,
    event_type = "session.created.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = created_at,
    event_id = event_id
);

impl SessionCreated {
    pub fn from_session(session: &Session) -> Self {
        Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            recipient_id: session.recipient_id().clone(),
            created_at: *session.created_at(),
            expires_at: *session.expires_at(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionRevoked
// ════════════════════════════════════════════════════════════════════════════

/// Published when a session is revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRevoked {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub recipient_id: RecipientId,
    pub revoked_at: Timestamp,
}

domain_event!(
    SessionRevoked,
    event_type = "session.revoked.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = revoked_at,
    event_id = event_id
);

impl SessionRevoked {
    /// Builds the event from a revoked session.
    ///
    /// Returns `None` if the session has not been revoked.
    pub fn from_session(session: &Session) -> Option<Self> {
        Some(Self {
            event_id: EventId::new(),
            session_id: *session.id(),
            recipient_id: session.recipient_id().clone(),
            revoked_at: *session.revoked_at()?,
        })
    }
}
