//! # Event Bus
//!
//! Synchronous observer list used by the trackers to notify external
//! consumers (map, GUI, persistence).
//!
//! Listeners run on the caller's thread, in subscription order, before
//! `emit` returns. A decode step that emits several notifications therefore
//! delivers them in exactly the order they were emitted.
//!
//! # Example
//!
//! ```
//! use seq_core::EventBus;
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let mut bus = EventBus::new();
//!
//! let sink = seen.clone();
//! bus.subscribe(move |event: &u32| sink.lock().push(*event));
//!
//! bus.emit(7);
//! assert_eq!(*seen.lock(), vec![7]);
//! ```

use std::fmt;
use std::sync::Arc;

/// Type for event listener functions
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Ordered list of listeners for one event type
pub struct EventBus<E> {
    listeners: Vec<Listener<E>>,
}

impl<E> EventBus<E> {
    /// Create a bus with no listeners
    #[inline]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener
    ///
    /// Listeners are invoked in registration order.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        tracing::trace!("Registered listener #{}", self.listeners.len());
    }

    /// Deliver an event to every listener
    pub fn emit(&self, event: E) {
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// Number of registered listeners
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
