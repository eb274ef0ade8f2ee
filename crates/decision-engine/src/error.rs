//! Engine Error Types

use classifier::ClassifyError;
use thiserror::Error;

/// Errors from the decision pipeline
#[derive(Debug, Error)]
pub enum EngineError {
    /// Reading refused by the classifier
    #[error("Reading rejected: {0}")]
    Classify(#[from] ClassifyError),

    /// Producer task panicked or was cancelled
    #[error("Producer task failed: {0}")]
    Producer(#[from] tokio::task::JoinError),
}

/// Errors while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
