//! Listener port: receives every event published through the hub.

use homesim_domain::event::Event;

/// Receives notifications, synchronously, on the publishing thread.
///
/// Listeners must not publish from inside [`on_event`](Self::on_event):
/// fan-out is serialized and a nested publish would wait on itself.
pub trait EventListener: Send + Sync {
    fn on_event(&self, event: &Event);
}

impl<F> EventListener for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn on_event(&self, event: &Event) {
        self(event);
    }
}
