//! EventDispatcher - Publishes events returned by command handlers.
//!
//! Handlers stay free of publishing concerns: they hand their events back
//! in the result and the caller forwards them here once the write is done.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

/// Forwards handler events to an [`EventPublisher`].
#[derive(Clone)]
pub struct EventDispatcher {
    publisher: Arc<dyn EventPublisher>,
}

impl EventDispatcher {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Publishes the events in order.
    ///
    /// A failing subscriber does not hold back the rest of the batch; the
    /// error reported afterwards covers every failure. The state change that
    /// produced the events is already persisted and is not undone.
    pub async fn dispatch(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        if events.is_empty() {
            debug!("No events to dispatch");
            return Ok(());
        }

        let count = events.len();
        self.publisher.publish_all(events).await.map_err(|e| {
            warn!(error = %e, count, "Event dispatch failed");
            e
        })?;

        debug!(count, "Events dispatched");
        Ok(())
    }
}
