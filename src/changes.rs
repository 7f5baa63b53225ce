//! ChangeSignal - Per-collection change notifications.
//!
//! A zero-payload signal fired after every successful mutation. Delivery is
//! synchronous and in-process, on whatever thread the mutation completed on;
//! observers must re-query if they need the new state and must not block in
//! their handler.

use std::sync::{Arc, RwLock};

type Listener = Box<dyn Fn() + Send + Sync>;

/// Observer list owned by one collection binding. Clone-friendly via Arc;
/// clones share the same listener set.
#[derive(Clone, Default)]
pub struct ChangeSignal {
    listeners: Arc<RwLock<Vec<Listener>>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler fired on every change.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push(Box::new(listener));
        }
    }

    /// Fire all registered handlers, in subscription order.
    pub fn emit(&self) {
        if let Ok(listeners) = self.listeners.read() {
            for listener in listeners.iter() {
                listener();
            }
        }
    }

    /// Number of registered handlers.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.read().map(|l| l.len()).unwrap_or(0)
    }
}
