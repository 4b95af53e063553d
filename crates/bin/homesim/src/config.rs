//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `homesim.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use homesim_app::controller::Timing;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Simulated time settings.
    pub timing: TimingConfig,
    /// Demo driver settings.
    pub demo: DemoConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Real-time length of simulated durations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Milliseconds in one simulated minute.
    pub minute_millis: u64,
    /// Simulated minutes the motion flag stays raised.
    pub motion_quiet_minutes: u32,
}

/// Demo driver toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Keep running until every shutoff timer has fired.
    pub wait_for_timers: bool,
    /// Print every notification as `[DISPLAY] …`.
    pub display: bool,
    /// Print every system log entry as `[LOG] …` when it is recorded.
    pub echo_log: bool,
}

impl Config {
    /// Load configuration from `homesim.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homesim.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMESIM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("HOMESIM_MINUTE_MILLIS") {
            if let Ok(millis) = val.parse() {
                self.timing.minute_millis = millis;
            }
        }
        if let Ok(val) = std::env::var("HOMESIM_WAIT_FOR_TIMERS") {
            if let Ok(wait) = val.parse() {
                self.demo.wait_for_timers = wait;
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.minute_millis == 0 {
            return Err(ConfigError::Validation(
                "minute_millis must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Decorator timing derived from the simulated minute length.
    #[must_use]
    pub fn timing(&self) -> Timing {
        let minute = Duration::from_millis(self.timing.minute_millis);
        Timing {
            minute,
            motion_quiet_period: minute.saturating_mul(self.timing.motion_quiet_minutes),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homesim=info,homesim_app=info".to_string(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            minute_millis: 60_000,
            motion_quiet_minutes: 5,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            wait_for_timers: false,
            display: true,
            echo_log: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
