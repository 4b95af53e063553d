//! Event log: keeps a timestamped history of every notification.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Local;
use homesim_app::ports::EventListener;
use homesim_domain::event::Event;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// In-memory system log, one formatted line per event.
///
/// Optionally echoes each new entry as `[LOG] <entry>` to a writer.
#[derive(Default)]
pub struct EventLog {
    entries: Mutex<Vec<String>>,
    echo: Option<Mutex<Box<dyn Write + Send>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that also writes every entry to `out` as it arrives.
    #[must_use]
    pub fn with_echo(out: impl Write + Send + 'static) -> Self {
        Self {
            entries: Mutex::default(),
            echo: Some(Mutex::new(Box::new(out))),
        }
    }

    /// Every entry logged so far, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Format one log line for `event`.
fn format_entry(event: &Event) -> String {
    let timestamp = event.timestamp.with_timezone(&Local).format(TIMESTAMP_FORMAT);
    format!("{timestamp} - {}", event.message)
}

impl EventListener for EventLog {
    fn on_event(&self, event: &Event) {
        let entry = format_entry(event);
        if let Some(echo) = &self.echo {
            let mut out = echo.lock().unwrap_or_else(PoisonError::into_inner);
            if let Err(err) = writeln!(out, "[LOG] {entry}") {
                tracing::warn!(error = %err, "failed to echo log entry");
            }
        }
        self.lock().push(entry);
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("entries", &self.len())
            .field("echo", &self.echo.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SharedBuffer;
    use chrono::{NaiveDateTime, TimeZone, Utc};

    #[test]
    fn should_format_entry_with_local_timestamp() {
        let mut event = Event::new("Room added: Kitchen");
        event.timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();

        let entry = format_entry(&event);

        let (stamp, message) = entry.split_once(" - ").unwrap();
        assert_eq!(message, "Room added: Kitchen");
        let parsed = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).unwrap();
        let local = Local.from_local_datetime(&parsed).single().unwrap();
        assert_eq!(local.with_timezone(&Utc), event.timestamp);
    }

    #[test]
    fn should_keep_entries_in_arrival_order() {
        let log = EventLog::new();

        log.on_event(&Event::new("first"));
        log.on_event(&Event::new("second"));

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ends_with(" - first"));
        assert!(entries[1].ends_with(" - second"));
    }

    #[test]
    fn should_clear_entries() {
        let log = EventLog::new();
        log.on_event(&Event::new("first"));

        log.clear();

        assert!(log.is_empty());
    }

    #[test]
    fn should_echo_each_entry_with_log_tag() {
        let buffer = SharedBuffer::default();
        let log = EventLog::with_echo(buffer.clone());

        log.on_event(&Event::new("Kitchen Lamp turned ON"));

        let text = buffer.contents();
        let entry = &log.entries()[0];
        assert_eq!(text, format!("[LOG] {entry}\n"));
        assert!(text.ends_with(" - Kitchen Lamp turned ON\n"));
    }
}
