//! Drone Decision Engine
//!
//! Wires the signal producers to the classification pipeline: every reading
//! is classified, folded into the state store and, when the overall severity
//! changes, turned into an operator action.

mod engine;
mod error;
mod logging;
mod monitor;
mod settings;

pub use engine::{DecisionEngine, Outcome, SharedEngine};
pub use error::{ConfigError, EngineError};
pub use logging::init_logging;
pub use monitor::{run_engine, run_monitor, RunSummary};
pub use settings::{
    ClassificationConfig, LoggingConfig, MonitorConfig, CONFIG_PATH_VAR, DEFAULT_CONFIG_FILE,
    ENV_PREFIX,
};
