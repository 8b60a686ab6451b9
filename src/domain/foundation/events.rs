//! Domain events and the envelope they travel in.
//!
//! Session events implement [`DomainEvent`] through the `domain_event!`
//! macro. Handlers convert them with [`SerializableDomainEvent::to_envelope`]
//! and return the envelopes; the application dispatcher publishes them.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::{DomainError, ErrorCode, Timestamp};

/// Routing and identity data every domain event exposes.
pub trait DomainEvent: Send + Sync {
    /// Versioned routing key, e.g. `"session.created.v1"`.
    fn event_type(&self) -> &'static str;

    /// Payload schema version; agrees with the `.vN` suffix of `event_type`.
    fn schema_version(&self) -> u32;

    fn aggregate_id(&self) -> String;

    fn aggregate_type(&self) -> &'static str;

    fn occurred_at(&self) -> Timestamp;

    fn event_id(&self) -> EventId;
}

/// Envelope conversion for events that serialize, implemented for all of them.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// # Errors
    ///
    /// - `InternalError` if the event cannot be serialized to JSON
    fn to_envelope(&self) -> Result<EventEnvelope, DomainError> {
        EventEnvelope::from_event(self)
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Implements [`DomainEvent`] by naming the struct fields that back it.
///
/// ```ignore
/// domain_event!(
///     SessionRevoked,
///     event_type = "session.revoked.v1",
///     schema_version = 1,
///     aggregate_id = session_id,
///     aggregate_type = "Session",
///     occurred_at = revoked_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event:ident,
        event_type = $event_type:expr,
        schema_version = $version:expr,
        aggregate_id = $aggregate_id:ident,
        aggregate_type = $aggregate_type:expr,
        occurred_at = $occurred_at:ident,
        event_id = $event_id:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn schema_version(&self) -> u32 {
                $version
            }

            fn aggregate_id(&self) -> String {
                self.$aggregate_id.to_string()
            }

            fn aggregate_type(&self) -> &'static str {
                $aggregate_type
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_at
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id.clone()
            }
        }
    };
}

pub use domain_event;

/// Identity of one emitted event, used by subscribers to drop duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request context copied from the command that produced the event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

/// A domain event flattened for transport: routing fields plus a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: EventId,
    pub event_type: String,
    pub schema_version: u32,
    pub aggregate_id: String,
    pub aggregate_type: String,
    pub occurred_at: Timestamp,
    pub payload: JsonValue,
    pub metadata: EventMetadata,
}

/// Reads the `N` of a trailing `.vN`; unversioned types count as version 1.
fn version_suffix(event_type: &str) -> u32 {
    event_type
        .rsplit_once(".v")
        .and_then(|(_, n)| n.parse().ok())
        .unwrap_or(1)
}

impl EventEnvelope {
    /// Builds an envelope for an ad-hoc payload, stamped now with a fresh id.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        aggregate_type: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        let event_type = event_type.into();
        Self {
            event_id: EventId::new(),
            schema_version: version_suffix(&event_type),
            event_type,
            aggregate_id: aggregate_id.into(),
            aggregate_type: aggregate_type.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    /// Wraps a domain event, keeping its id and occurrence time.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the event cannot be serialized to JSON
    pub fn from_event<T>(event: &T) -> Result<Self, DomainError>
    where
        T: DomainEvent + Serialize + ?Sized,
    {
        let payload = serde_json::to_value(event).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize {}: {}", event.event_type(), e),
            )
        })?;

        Ok(Self {
            event_id: event.event_id(),
            event_type: event.event_type().to_string(),
            schema_version: event.schema_version(),
            aggregate_id: event.aggregate_id(),
            aggregate_type: event.aggregate_type().to_string(),
            occurred_at: event.occurred_at(),
            payload,
            metadata: EventMetadata::default(),
        })
    }

    /// Decodes the payload back into a concrete event type.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct TokenRotated {
        event_id: EventId,
        session_id: String,
        occurred_at: Timestamp,
    }

    domain_event!(
        TokenRotated,
        event_type = "token.rotated.v2",
        schema_version = 2,
        aggregate_id = session_id,
        aggregate_type = "Session",
        occurred_at = occurred_at,
        event_id = event_id
    );

    fn rotated(session_id: &str) -> TokenRotated {
        TokenRotated {
            event_id: EventId::new(),
            session_id: session_id.to_string(),
            occurred_at: Timestamp::now(),
        }
    }

    #[test]
    fn event_ids_are_unique_and_serialize_as_strings() {
        let id = EventId::new();
        assert_ne!(id, EventId::new());
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", id));
    }

    #[test]
    fn empty_metadata_serializes_to_empty_object() {
        let json = serde_json::to_value(EventMetadata::default()).unwrap();
        assert_eq!(json, json!({}));
    }

    #[test]
    fn new_envelope_reads_version_from_type() {
        assert_eq!(
            EventEnvelope::new("session.revoked.v3", "s-1", "Session", json!({})).schema_version,
            3
        );
        assert_eq!(
            EventEnvelope::new("legacy.event", "s-1", "Session", json!({})).schema_version,
            1
        );
    }

    #[test]
    fn to_envelope_copies_event_fields() {
        let event = rotated("session-9");

        let envelope = event.to_envelope().unwrap();

        assert_eq!(envelope.event_id, event.event_id);
        assert_eq!(envelope.event_type, "token.rotated.v2");
        assert_eq!(envelope.schema_version, 2);
        assert_eq!(envelope.aggregate_id, "session-9");
        assert_eq!(envelope.aggregate_type, "Session");
        assert_eq!(envelope.occurred_at, event.occurred_at);
        assert_eq!(envelope.metadata, EventMetadata::default());
    }

    #[test]
    fn payload_decodes_back_into_event() {
        let envelope = rotated("session-abc").to_envelope().unwrap();

        let restored: TokenRotated = envelope.payload_as().unwrap();
        assert_eq!(restored.session_id, "session-abc");
    }
}
