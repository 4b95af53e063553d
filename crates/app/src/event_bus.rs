//! In-process notification hub with synchronous, ordered fan-out.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use homesim_domain::event::Event;
use homesim_domain::id::ListenerId;

use crate::ports::EventListener;

/// Distributes every event to all registered listeners, in registration order.
///
/// [`publish`](Self::publish) returns only once each listener has handled the
/// event. Publishes from different threads (foreground calls and firing
/// timers) are serialized, so a listener always sees whole events one at a
/// time. A listener that panics is not isolated: the panic unwinds into the
/// publishing call.
#[derive(Default)]
pub struct NotificationHub {
    listeners: Mutex<Vec<(ListenerId, Arc<dyn EventListener>)>>,
    fan_out: Mutex<()>,
}

impl NotificationHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives every event published from now on.
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> ListenerId {
        let id = ListenerId::new();
        self.lock_listeners().push((id, listener));
        tracing::debug!(listener = %id, "listener added");
        id
    }

    /// Unregister a listener. Returns `false` if `id` was not registered.
    ///
    /// Removing a listener while an event is being fanned out does not affect
    /// that event: the in-flight publish works on the listener set it started
    /// with.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.lock_listeners();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        before != listeners.len()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    /// Publish a notification message to every listener.
    pub fn notify(&self, message: impl Into<String>) {
        self.publish(&Event::new(message));
    }

    /// Publish an event to every listener.
    pub fn publish(&self, event: &Event) {
        let _serialized = self.fan_out.lock().unwrap_or_else(PoisonError::into_inner);
        let listeners: Vec<Arc<dyn EventListener>> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::debug!(
            listeners = listeners.len(),
            message = %event.message,
            "publishing event"
        );
        for listener in listeners {
            listener.on_event(event);
        }
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(ListenerId, Arc<dyn EventListener>)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}
