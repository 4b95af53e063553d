//! Console display: prints every event as it happens.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use homesim_app::ports::EventListener;
use homesim_domain::event::Event;

/// Writes `[DISPLAY] <message>` for every event.
pub struct ConsoleDisplay {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new(std::io::stdout())
    }
}

impl ConsoleDisplay {
    /// Display events on an arbitrary writer.
    #[must_use]
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl EventListener for ConsoleDisplay {
    fn on_event(&self, event: &Event) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "[DISPLAY] {}", event.message) {
            tracing::warn!(error = %err, "failed to display event");
        }
    }
}
