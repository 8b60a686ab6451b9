//! SessionAuditLogger - Writes session lifecycle events to the audit log.
//!
//! Subscribe it to the session event types:
//!
//! ```ignore
//! bus.subscribe_all(
//!     SessionAuditLogger::EVENT_TYPES,
//!     Arc::new(SessionAuditLogger::new()),
//! );
//! ```
//!
//! Records go to the `audit` tracing target so deployments can route them
//! separately from application logs.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::domain::session::{SessionCreated, SessionRevoked};
use crate::ports::EventHandler;

const CREATED: &str = "session.created.v1";
const REVOKED: &str = "session.revoked.v1";

#[derive(Debug, Default, Clone, Copy)]
pub struct SessionAuditLogger;

impl SessionAuditLogger {
    pub const EVENT_TYPES: &'static [&'static str] = &[CREATED, REVOKED];

    pub fn new() -> Self {
        Self
    }
}

fn malformed(envelope: &EventEnvelope, err: serde_json::Error) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("Malformed {} payload: {}", envelope.event_type, err),
    )
    .with_detail("event_id", envelope.event_id.as_str())
}

#[async_trait]
impl EventHandler for SessionAuditLogger {
    async fn handle(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
        let correlation_id = envelope.metadata.correlation_id.as_deref().unwrap_or("-");
        let actor_id = envelope.metadata.actor_id.as_deref().unwrap_or("-");

        match envelope.event_type.as_str() {
            CREATED => {
                let event: SessionCreated =
                    envelope.payload_as().map_err(|e| malformed(&envelope, e))?;
                info!(
                    target: "audit",
                    event_id = %envelope.event_id.as_str(),
                    session_id = %event.session_id,
                    recipient_id = %event.recipient_id,
                    expires_at = %event.expires_at,
                    correlation_id,
                    actor_id,
                    "session created"
                );
            }
            REVOKED => {
                let event: SessionRevoked =
                    envelope.payload_as().map_err(|e| malformed(&envelope, e))?;
                info!(
                    target: "audit",
                    event_id = %envelope.event_id.as_str(),
                    session_id = %event.session_id,
                    recipient_id = %event.recipient_id,
                    revoked_at = %event.revoked_at,
                    correlation_id,
                    actor_id,
                    "session revoked"
                );
            }
            other => {
                debug!(event_type = other, "Audit logger ignoring event");
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "SessionAuditLogger"
    }
}
