//! Command infrastructure for CQRS handlers.
//!
//! `CommandMetadata` carries request context through command processing so
//! handlers can stamp it on the events they emit.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventEnvelope, EventMetadata};

/// Metadata context for command handlers.
///
/// Login flows, logout flows and the maintenance scheduler all build one
/// of these; `source` tells them apart in logs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Identity executing this command, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    actor_id: Option<String>,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Where the command came from (e.g., "login", "logout", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actor_id(mut self, id: impl Into<String>) -> Self {
        self.actor_id = Some(id.into());
        self
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Source for log fields; `"-"` when the caller gave none.
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("-")
    }

    /// Context carried on emitted events. A missing correlation id is minted
    /// so every event of one command shares one.
    pub fn event_metadata(&self) -> EventMetadata {
        EventMetadata {
            correlation_id: Some(
                self.correlation_id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            ),
            actor_id: self.actor_id.clone(),
        }
    }

    /// Stamps this context onto an outgoing event envelope.
    pub fn stamp(&self, envelope: EventEnvelope) -> EventEnvelope {
        EventEnvelope {
            metadata: self.event_metadata(),
            ..envelope
        }
    }
}
