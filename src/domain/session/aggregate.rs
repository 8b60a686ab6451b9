//! Session aggregate entity.
//!
//! A session binds an access token to its owning recipient for a bounded
//! time window.
//!
//! # State machine
//!
//! ```text
//! Active ──(time passes expires_at)──▶ Expired
//!    └────────(revoke)───────────────▶ Revoked
//! ```
//!
//! Expired is never written; it is recomputed from `expires_at` against
//! the wall clock. Revoked is written exactly once.

use crate::domain::foundation::{RecipientId, SessionId, Timestamp};

use super::{AccessToken, SessionError, SessionStatus};

/// Construction properties for a new session.
///
/// `created_at` defaults to now and `revoked_at` to `None`.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub id: Option<SessionId>,
    pub recipient_id: RecipientId,
    pub access_token: AccessToken,
    pub created_at: Option<Timestamp>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
}

impl NewSession {
    pub fn new(recipient_id: RecipientId, access_token: AccessToken, expires_at: Timestamp) -> Self {
        Self {
            id: None,
            recipient_id,
            access_token,
            created_at: None,
            expires_at,
            revoked_at: None,
        }
    }

    pub fn with_id(mut self, id: SessionId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_revoked_at(mut self, revoked_at: Timestamp) -> Self {
        self.revoked_at = Some(revoked_at);
        self
    }
}

/// Session aggregate.
///
/// # Invariants
///
/// - `expires_at >= created_at`
/// - `revoked_at >= created_at` when present
/// - `revoked_at` is set at most once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    recipient_id: RecipientId,
    access_token: AccessToken,
    created_at: Timestamp,
    expires_at: Timestamp,
    revoked_at: Option<Timestamp>,
}

impl Session {
    /// Create a session, enforcing the timestamp invariants.
    ///
    /// # Errors
    ///
    /// - `InvalidExpiration` if `expires_at` precedes `created_at`
    /// - `InvalidRevocationTimestamp` if `revoked_at` precedes `created_at`
    pub fn create(props: NewSession) -> Result<Self, SessionError> {
        let created_at = props.created_at.unwrap_or_else(Timestamp::now);

        if props.expires_at.is_before(&created_at) {
            return Err(SessionError::InvalidExpiration);
        }
        if let Some(revoked_at) = &props.revoked_at {
            if revoked_at.is_before(&created_at) {
                return Err(SessionError::InvalidRevocationTimestamp);
            }
        }

        Ok(Self {
            id: props.id.unwrap_or_default(),
            recipient_id: props.recipient_id,
            access_token: props.access_token,
            created_at,
            expires_at: props.expires_at,
            revoked_at: props.revoked_at,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    pub fn reconstitute(
        id: SessionId,
        recipient_id: RecipientId,
        access_token: AccessToken,
        created_at: Timestamp,
        expires_at: Timestamp,
        revoked_at: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            recipient_id,
            access_token,
            created_at,
            expires_at,
            revoked_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn recipient_id(&self) -> &RecipientId {
        &self.recipient_id
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn expires_at(&self) -> &Timestamp {
        &self.expires_at
    }

    pub fn revoked_at(&self) -> Option<&Timestamp> {
        self.revoked_at.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Predicates
    // ─────────────────────────────────────────────────────────────────────────

    /// True once the wall clock has passed `expires_at`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(&Timestamp::now())
    }

    /// Expiration check against an explicit instant.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at.is_before(now)
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_valid(&self) -> bool {
        !self.is_revoked() && !self.is_expired()
    }

    /// Structural comparison of the owner against a claimed identity.
    pub fn belongs_to(&self, recipient_id: &str) -> bool {
        self.recipient_id.as_str() == recipient_id
    }

    /// Derived lifecycle status. Revocation wins over expiration.
    pub fn status(&self) -> SessionStatus {
        if self.is_revoked() {
            SessionStatus::Revoked
        } else if self.is_expired() {
            SessionStatus::Expired
        } else {
            SessionStatus::Active
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Revoke the session.
    ///
    /// # Errors
    ///
    /// - `AlreadyRevoked` if the session was revoked before
    pub fn revoke(&mut self) -> Result<(), SessionError> {
        if self.is_revoked() {
            return Err(SessionError::AlreadyRevoked);
        }
        self.revoked_at = Some(Timestamp::now());
        Ok(())
    }
}
