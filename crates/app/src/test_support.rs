//! Shared helpers for unit tests.

use std::sync::{Arc, Mutex};

use homesim_domain::event::Event;

use crate::event_bus::NotificationHub;
use crate::ports::EventListener;

/// Listener that keeps every event it receives.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn attach(hub: &NotificationHub) -> Self {
        let recorder = Self::default();
        hub.add_listener(Arc::new(recorder.clone()));
        recorder
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.message).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl EventListener for Recorder {
    fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }
}
