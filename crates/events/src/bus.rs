//! Where events go once the core has built them.
//!
//! The core never knows its host. A browser extension forwards payloads to
//! its content script, the CLI prints JSON lines, tests collect them in
//! memory. All of them implement [`EventBus`].

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Sink for `(topic, payload)` pairs. Topics come from [`crate::event_names`].
///
/// Implementations must not block for long: emission happens on the typing
/// path.
pub trait EventBus: Send + Sync {
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

/// Shared handle for hosts that hand one bus to several components.
pub type EventBusRef = Arc<dyn EventBus>;

/// Serialize `event` and emit it on `topic`.
///
/// A payload that fails to serialize is logged and dropped.
pub fn emit_event<E: Serialize>(bus: &dyn EventBus, topic: &str, event: &E) {
    match serde_json::to_value(event) {
        Ok(payload) => bus.emit(topic, payload),
        Err(e) => tracing::warn!(topic, error = %e, "failed to serialize event"),
    }
}

/// One recorded emission.
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Keeps every emission in order; for tests and for hosts that poll.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves the Vec intact.
    fn lock(&self) -> MutexGuard<'_, Vec<EmittedEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        self.lock().clone()
    }

    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.lock()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    /// Take everything recorded so far, leaving the bus empty.
    pub fn drain(&self) -> Vec<EmittedEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        tracing::trace!(topic, "event recorded");
        self.lock().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// Drops everything. For hosts that only want return values.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {}
}
