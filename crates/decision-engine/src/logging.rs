//! Logging setup

use tracing_subscriber::FmtSubscriber;

use crate::settings::LoggingConfig;

/// Install the global tracing subscriber
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let builder = FmtSubscriber::builder()
        .with_max_level(config.max_level()?)
        .with_target(config.target)
        .with_ansi(config.ansi && !config.json);

    if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}
