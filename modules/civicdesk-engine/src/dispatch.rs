//! NotificationDispatcher — in-process fan-out of domain events.
//!
//! Handlers register per event kind and run synchronously in registration
//! order. A failing or panicking handler is logged and skipped; it never
//! breaks the remaining handlers or the operation that produced the event.
//! Nothing is persisted here.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::RwLock;

use tracing::warn;

use civicdesk_common::{DomainEvent, EventKind};

pub type Handler = Box<dyn Fn(&DomainEvent) -> anyhow::Result<()> + Send + Sync>;

/// Observer registry. Callable from any thread; subscription and dispatch
/// take the registry lock independently of the coordinator's state lock.
#[derive(Default)]
pub struct NotificationDispatcher {
    handlers: RwLock<HashMap<EventKind, Vec<Handler>>>,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for one event kind. Handlers for a kind run in
    /// the order they were registered.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&DomainEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.write().expect("dispatcher lock poisoned");
        handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Invoke every handler registered for the event's kind, in order.
    /// Handler failures are isolated: logged at warn, never propagated.
    pub fn dispatch(&self, event: &DomainEvent) {
        let handlers = self.handlers.read().expect("dispatcher lock poisoned");
        let Some(for_kind) = handlers.get(&event.kind()) else {
            return;
        };

        for (position, handler) in for_kind.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!(kind = ?event.kind(), position, error = %e, "Notification handler failed");
                }
                Err(_) => {
                    warn!(kind = ?event.kind(), position, "Notification handler panicked");
                }
            }
        }
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers
            .read()
            .expect("dispatcher lock poisoned")
            .get(&kind)
            .map_or(0, Vec::len)
    }
}
