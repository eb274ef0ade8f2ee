//! Monitor wiring: both producers feeding one engine

use signal_producers::{AnomalyProducer, BatteryProducer, Producer, StopSignal};
use state_store::StoreSnapshot;
use std::future::Future;
use std::sync::Arc;
use tracing::info;

use crate::engine::{DecisionEngine, SharedEngine};
use crate::error::EngineError;
use crate::settings::MonitorConfig;

/// Totals reported once the monitor has shut down
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub battery_readings: u64,
    pub anomaly_readings: u64,
    pub dispatches: u64,
    pub final_state: StoreSnapshot,
}

/// Run the monitor until `shutdown` resolves
pub async fn run_monitor<F>(config: MonitorConfig, shutdown: F) -> Result<RunSummary, EngineError>
where
    F: Future<Output = ()>,
{
    let engine = SharedEngine::new(DecisionEngine::from_config(&config));
    run_engine(engine, &config, shutdown).await
}

/// Drive an already built engine with the configured producers
pub async fn run_engine<F>(
    engine: SharedEngine,
    config: &MonitorConfig,
    shutdown: F,
) -> Result<RunSummary, EngineError>
where
    F: Future<Output = ()>,
{
    engine.start().await;

    let mut battery = BatteryProducer::new(&config.battery);
    battery.add_observer(Arc::new(engine.clone()));
    let mut anomaly = AnomalyProducer::new(&config.anomaly);
    anomaly.add_observer(Arc::new(engine.clone()));

    let stop = StopSignal::new();
    let battery_task = tokio::spawn({
        let stop = stop.clone();
        async move { battery.run(stop).await }
    });
    let anomaly_task = tokio::spawn({
        let stop = stop.clone();
        async move { anomaly.run(stop).await }
    });

    shutdown.await;
    info!("Shutdown requested, stopping producers");
    stop.stop();

    let (battery_readings, anomaly_readings) = tokio::join!(battery_task, anomaly_task);
    let guard = engine.lock().await;
    let summary = RunSummary {
        battery_readings: battery_readings?,
        anomaly_readings: anomaly_readings?,
        dispatches: guard.dispatch_count(),
        final_state: guard.store().snapshot(),
    };

    info!(
        "Monitor stopped: {} battery / {} anomaly readings, {} actions, final overall state {}",
        summary.battery_readings,
        summary.anomaly_readings,
        summary.dispatches,
        summary.final_state.overall.severity
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_dispatch::{Action, ActionLog};
    use classifier::Severity;
    use std::time::Duration;

    async fn engine_with_log(config: &MonitorConfig) -> (SharedEngine, ActionLog) {
        let log = ActionLog::new();
        let engine = SharedEngine::new(DecisionEngine::from_config(config));
        engine.lock().await.add_sink(log.clone());
        (engine, log)
    }

    #[tokio::test(start_paused = true)]
    async fn test_battery_drain_action_sequence() {
        let mut config = MonitorConfig::default();
        // Keep the anomaly detector silent for the whole run
        config.anomaly.interval_ms = 60_000;
        let (engine, log) = engine_with_log(&config).await;

        // Battery ticks at 1..=9s: 90, 80, 70, .., 10
        let shutdown = tokio::time::sleep(Duration::from_millis(9500));
        let summary = run_engine(engine, &config, shutdown).await.unwrap();

        assert_eq!(summary.battery_readings, 9);
        assert_eq!(summary.anomaly_readings, 0);
        assert_eq!(
            log.actions(),
            [
                Action::ContinueMission,
                Action::ReturnHomeSoon,
                Action::ReturnHomeImmediately,
                Action::EmergencyLanding,
            ]
        );
        assert_eq!(summary.dispatches, 4);
        assert_eq!(summary.final_state.overall.severity, Severity::Critical);
        assert_eq!(summary.final_state.components.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_monitor_with_both_producers() {
        let mut config = MonitorConfig::default();
        config.anomaly.seed = Some(3);
        let (engine, log) = engine_with_log(&config).await;

        // Battery ticks at 1..=9s, anomaly at 2, 4, 6, 8s
        let shutdown = tokio::time::sleep(Duration::from_millis(9500));
        let summary = run_engine(engine, &config, shutdown).await.unwrap();

        assert_eq!(summary.battery_readings, 9);
        assert_eq!(summary.anomaly_readings, 4);
        assert_eq!(summary.final_state.components.len(), 2);
        // 10% battery is Critical whatever the anomaly detector says
        assert_eq!(summary.final_state.overall.severity, Severity::Critical);

        let actions = log.actions();
        assert_eq!(actions.len() as u64, summary.dispatches);
        assert_eq!(actions.first(), Some(&Action::ContinueMission));
        assert_eq!(actions.last(), Some(&Action::EmergencyLanding));
        // Every dispatch marks a change of overall state
        assert!(actions.windows(2).all(|pair| pair[0] != pair[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_shutdown() {
        let summary = run_monitor(MonitorConfig::default(), async {}).await.unwrap();

        assert_eq!(summary.battery_readings, 0);
        assert_eq!(summary.anomaly_readings, 0);
        // Only the initial "Continue mission"
        assert_eq!(summary.dispatches, 1);
        assert_eq!(summary.final_state.overall.severity, Severity::Normal);
    }
}
