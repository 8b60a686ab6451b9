//! Session-specific error types.
//!
//! Every expected condition in the session lifecycle is a variant here.
//! Only repository failures surface as `Unexpected`.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Tagged outcome for session lifecycle failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Token string is not three URL-safe base64 segments.
    #[error("Invalid access token: {0}")]
    InvalidAccessToken(String),

    /// `expires_at` precedes `created_at`.
    #[error("Session expiration must not precede its creation")]
    InvalidExpiration,

    /// `revoked_at` precedes `created_at`.
    #[error("Session revocation must not precede its creation")]
    InvalidRevocationTimestamp,

    /// No session matches the presented token.
    #[error("Session not found")]
    NotFound,

    /// The session belongs to a different identity.
    #[error("Not allowed to access this session")]
    NotAllowed,

    /// The session's expiration instant has passed.
    #[error("Session expired")]
    Expired,

    /// The session was already revoked.
    #[error("Session already revoked")]
    AlreadyRevoked,

    /// Listing parameters are out of range.
    #[error("Invalid session filter: {0}")]
    InvalidFilter(String),

    /// The recipient has never been issued a session.
    #[error("No session found for recipient")]
    NoSessionForRecipient,

    /// Repository or other infrastructure failure.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl SessionError {
    pub fn invalid_access_token(reason: impl Into<String>) -> Self {
        SessionError::InvalidAccessToken(reason.into())
    }

    pub fn invalid_filter(reason: impl Into<String>) -> Self {
        SessionError::InvalidFilter(reason.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        SessionError::Unexpected(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::InvalidAccessToken(_) => ErrorCode::InvalidAccessToken,
            SessionError::InvalidExpiration => ErrorCode::InvalidExpiration,
            SessionError::InvalidRevocationTimestamp => ErrorCode::InvalidRevocationTimestamp,
            SessionError::NotFound => ErrorCode::SessionNotFound,
            SessionError::NotAllowed => ErrorCode::Forbidden,
            SessionError::Expired => ErrorCode::SessionExpired,
            SessionError::AlreadyRevoked => ErrorCode::SessionRevoked,
            SessionError::InvalidFilter(_) => ErrorCode::ValidationFailed,
            SessionError::NoSessionForRecipient => ErrorCode::SessionNotFound,
            SessionError::Unexpected(_) => ErrorCode::DatabaseError,
        }
    }

    /// True for the outcomes an authentication layer reports uniformly
    /// as "unauthenticated".
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            SessionError::NotFound
                | SessionError::NotAllowed
                | SessionError::Expired
                | SessionError::AlreadyRevoked
        )
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            // Adapters that guard revocation at the row level report lost races this way.
            ErrorCode::SessionRevoked => SessionError::AlreadyRevoked,
            ErrorCode::SessionNotFound => SessionError::NotFound,
            _ => SessionError::Unexpected(err.to_string()),
        }
    }
}
