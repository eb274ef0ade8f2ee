//! Monitor configuration
//!
//! Layered from built-in defaults, an optional TOML file and
//! `DRONE_MONITOR_*` environment variables (nested keys use `__`, e.g.
//! `DRONE_MONITOR_BATTERY__STEP=-5`).

use classifier::RangePolicy;
use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use signal_producers::{AnomalyConfig, BatteryConfig};
use std::str::FromStr;
use tracing::Level;

use crate::error::ConfigError;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "DRONE_MONITOR";
/// Variable holding an explicit config file path
pub const CONFIG_PATH_VAR: &str = "DRONE_MONITOR_CONFIG";
/// File looked up when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "drone-monitor.toml";

/// Classification settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Handling of readings outside the sensor domain
    pub range_policy: RangePolicy,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Maximum level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Colour output
    pub ansi: bool,
    /// Include the event target
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            ansi: true,
            target: true,
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<Level, ConfigError> {
        Level::from_str(&self.level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.level)))
    }
}

/// Top-level monitor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub battery: BatteryConfig,
    pub anomaly: AnomalyConfig,
    pub classification: ClassificationConfig,
    pub logging: LoggingConfig,
}

impl MonitorConfig {
    /// Load from `$DRONE_MONITOR_CONFIG` (or `drone-monitor.toml` if present)
    /// and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).ok();
        let file = File::with_name(path.as_deref().unwrap_or(DEFAULT_CONFIG_FILE))
            .required(path.is_some());
        Self::build(Config::builder().add_source(file).add_source(Self::environment()))
    }

    /// Environment source with the monitor's prefix and separators
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// Deserialize and validate a prepared builder
    pub fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: MonitorConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the producers or logger cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.battery.interval_ms == 0 || self.anomaly.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "producer interval must be greater than zero".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.battery.start_percent) {
            return Err(ConfigError::Invalid(format!(
                "battery start_percent {} must be within [0, 100]",
                self.battery.start_percent
            )));
        }
        if !self.battery.step.is_finite() || self.battery.step == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "battery step {} must be a non-zero number",
                self.battery.step
            )));
        }
        self.logging.max_level()?;
        Ok(())
    }
}
