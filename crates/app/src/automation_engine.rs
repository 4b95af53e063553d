//! Automation engine: holds the named modes and runs the selected one.
//!
//! Exactly one mode is current at a time, starting with none. Running a mode
//! walks every device of every room, asks the strategy for the commands that
//! device needs, and applies them through the device's own operations, so
//! decorators and per-device notifications behave exactly as for a manual
//! call. A single "executed" notification follows the per-device ones.

use std::collections::HashMap;
use std::sync::Arc;

use homesim_domain::automation::AutomationStrategy;
use homesim_domain::error::HomeError;

use crate::event_bus::NotificationHub;
use crate::room::Room;

/// Registry of automation modes plus the currently selected one.
pub struct AutomationEngine {
    hub: Arc<NotificationHub>,
    modes: HashMap<String, Arc<dyn AutomationStrategy>>,
    current: Option<Arc<dyn AutomationStrategy>>,
}

impl AutomationEngine {
    #[must_use]
    pub fn new(hub: Arc<NotificationHub>) -> Self {
        Self {
            hub,
            modes: HashMap::new(),
            current: None,
        }
    }

    /// Register a mode under `key`, replacing any previous registration.
    ///
    /// The current selection is unaffected until [`set_mode`](Self::set_mode)
    /// is called again.
    pub fn register_mode(
        &mut self,
        key: impl Into<String>,
        strategy: Arc<dyn AutomationStrategy>,
    ) {
        let key = key.into();
        tracing::info!(mode = %key, strategy = strategy.name(), "automation mode registered");
        self.modes.insert(key, strategy);
    }

    /// Select the mode registered under `key`.
    ///
    /// Unknown keys leave the current mode unchanged. Returns whether the
    /// selection happened.
    pub fn set_mode(&mut self, key: &str) -> bool {
        let Some(strategy) = self.modes.get(key) else {
            tracing::debug!(mode = key, "unknown automation mode ignored");
            return false;
        };
        self.current = Some(Arc::clone(strategy));
        self.hub.notify(format!("Automation mode changed to: {key}"));
        true
    }

    /// The currently selected strategy, if any.
    #[must_use]
    pub fn current_mode(&self) -> Option<&dyn AutomationStrategy> {
        self.current.as_deref()
    }

    /// Registered mode keys, sorted.
    #[must_use]
    pub fn mode_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.modes.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Run the current mode over every device of `rooms`.
    ///
    /// Does nothing when no mode is selected. Returns the display name of
    /// the mode that ran.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnsupportedCommand`] if the strategy planned a
    /// command a device cannot take; devices visited before the failure keep
    /// their new state and no completion notification is sent.
    pub fn execute<'a>(
        &self,
        rooms: impl IntoIterator<Item = &'a Room>,
    ) -> Result<Option<&str>, HomeError> {
        let Some(strategy) = self.current.as_deref() else {
            return Ok(None);
        };

        let mut applied = 0_usize;
        for room in rooms {
            for device in room.list_devices() {
                for command in strategy.plan(device.name(), &device.kind()) {
                    device.apply(command)?;
                    applied += 1;
                }
            }
        }

        tracing::info!(
            mode = strategy.name(),
            commands = applied,
            "automation mode executed"
        );
        let message = format!("Executed automation mode: {}", strategy.name());
        self.hub.notify(message);
        Ok(Some(strategy.name()))
    }
}

impl std::fmt::Debug for AutomationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationEngine")
            .field("modes", &self.mode_keys())
            .field("current", &self.current.as_ref().map(|s| s.name()))
            .finish_non_exhaustive()
    }
}
