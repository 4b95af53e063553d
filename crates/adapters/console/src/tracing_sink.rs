//! Tracing bridge: forwards notifications to the `tracing` subscriber.

use homesim_app::ports::EventListener;
use homesim_domain::event::Event;

/// Emits an `info` event on the `homesim::events` target per notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventListener for TracingSink {
    fn on_event(&self, event: &Event) {
        tracing::info!(
            target: "homesim::events",
            event_id = %event.id,
            "{}",
            event.message
        );
    }
}
