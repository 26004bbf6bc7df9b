//! Per-event handler registry.
//!
//! Thread-safe via an interior mutex; shared by the connection task and the
//! subscribing components. Handlers are invoked sequentially, in
//! subscription order, and run to completion before the next event is
//! dispatched, so they must not block.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::events::LiveEvent;

/// Callback invoked for every live event matching its subscription.
pub type EventHandler = Arc<dyn Fn(&LiveEvent) + Send + Sync>;

/// Token identifying one subscription, for targeted removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registry of event-name → handler lists.
#[derive(Default)]
pub struct HandlerRegistry {
    next_id: AtomicU64,
    handlers: Mutex<HashMap<String, Vec<(SubscriptionId, EventHandler)>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for the named event.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> SubscriptionId
    where
        F: Fn(&LiveEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers
            .lock()
            .expect("handler registry lock poisoned")
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove one subscription by id; unknown ids are a no-op.
    pub fn unsubscribe(&self, event: &str, id: SubscriptionId) {
        let mut handlers = self
            .handlers
            .lock()
            .expect("handler registry lock poisoned");
        if let Some(list) = handlers.get_mut(event) {
            list.retain(|(sub_id, _)| *sub_id != id);
            if list.is_empty() {
                handlers.remove(event);
            }
        }
    }

    /// Remove every handler registered for the named event.
    pub fn unsubscribe_all(&self, event: &str) {
        self.handlers
            .lock()
            .expect("handler registry lock poisoned")
            .remove(event);
    }

    /// Number of handlers currently registered for the named event.
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers
            .lock()
            .expect("handler registry lock poisoned")
            .get(event)
            .map_or(0, Vec::len)
    }

    /// Invoke every handler registered for `event`'s name.
    ///
    /// Handles are cloned out of the lock before invocation so a handler may
    /// itself subscribe or unsubscribe without deadlocking. Returns the
    /// number of handlers invoked.
    pub fn dispatch(&self, event: &LiveEvent) -> usize {
        let handlers: Vec<EventHandler> = self
            .handlers
            .lock()
            .expect("handler registry lock poisoned")
            .get(event.name())
            .map(|list| list.iter().map(|(_, handler)| Arc::clone(handler)).collect())
            .unwrap_or_default();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }
}
