//! Drone State Monitor - Main Entry Point

use decision_engine::{init_logging, run_monitor, MonitorConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = MonitorConfig::load()?;
    init_logging(&config.logging)?;

    info!("=== Drone State Monitor v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Press Ctrl-C to stop");

    run_monitor(config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
        }
    })
    .await?;

    Ok(())
}
