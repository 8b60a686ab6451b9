//! In-process event bus.
//!
//! Delivers session events to subscribed handlers synchronously, in
//! publication order, and keeps a copy of everything published so tests
//! and diagnostics can inspect it.
//!
//! A handler failure never stops delivery: every subscriber sees the event
//! and every event of a batch is delivered. Failures are reported together
//! once the whole batch has gone out.
//!
//! A poisoned lock is recovered rather than propagated; the guarded data
//! is plain vectors that stay consistent across a panicking writer.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::warn;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

type Subscriptions = HashMap<String, Vec<Arc<dyn EventHandler>>>;

/// In-memory event bus.
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe_all(SessionAuditLogger::EVENT_TYPES, Arc::new(SessionAuditLogger::new()));
/// EventDispatcher::new(bus.clone()).dispatch(result.events).await?;
/// ```
#[derive(Default)]
pub struct InMemoryEventBus {
    subscriptions: RwLock<Subscriptions>,
    history: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published events, oldest first.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns events emitted by one session.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear(&self) {
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn subscribers_of(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }

    /// Records `event` and hands it to each subscriber.
    ///
    /// Returns one `"<handler>: <error>"` line per failed subscriber.
    async fn deliver(&self, event: EventEnvelope) -> Vec<String> {
        self.history
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());

        // Subscribers are cloned out so no lock is held across an await.
        let mut failures = Vec::new();
        for handler in self.subscribers_of(&event.event_type) {
            if let Err(e) = handler.handle(event.clone()).await {
                warn!(
                    handler = handler.name(),
                    event_type = %event.event_type,
                    aggregate_id = %event.aggregate_id,
                    error = %e,
                    "Event handler failed"
                );
                failures.push(format!("{}: {}", handler.name(), e));
            }
        }
        failures
    }
}

fn handler_failures(failures: Vec<String>) -> Result<(), DomainError> {
    if failures.is_empty() {
        return Ok(());
    }
    Err(DomainError::new(
        ErrorCode::InternalError,
        format!("Handler errors: {}", failures.join(", ")),
    ))
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        handler_failures(self.deliver(event).await)
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        let mut failures = Vec::new();
        for event in events {
            failures.extend(self.deliver(event).await);
        }
        handler_failures(failures)
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.subscribe_all(&[event_type], handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for event_type in event_types {
            subscriptions
                .entry((*event_type).to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}
