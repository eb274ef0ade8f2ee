//! Decision Engine Implementation
//!
//! Runs every reading through classify → update → aggregate → dispatch.

use action_dispatch::{Action, ActionDispatcher, ActionSink, DispatchConfig};
use async_trait::async_trait;
use classifier::{Classifier, RangePolicy, Reading, Severity};
use signal_producers::ReadingObserver;
use state_store::{ComponentState, OverallState, StateStore, StoreSnapshot};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::error::EngineError;
use crate::settings::MonitorConfig;

/// What a single reading changed
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub reading: Reading,
    /// Severity the reading classified to
    pub severity: Severity,
    /// New component state, if it changed
    pub component: Option<ComponentState>,
    /// New overall state, if it changed
    pub overall: Option<OverallState>,
    /// Action dispatched for the new overall state
    pub action: Option<Action>,
}

/// Owns the state store and turns readings into actions
pub struct DecisionEngine {
    classifier: Classifier,
    store: StateStore,
    dispatcher: ActionDispatcher,
    started: bool,
}

impl DecisionEngine {
    pub fn new(policy: RangePolicy, dispatch: DispatchConfig) -> Self {
        info!("Creating decision engine (range policy {:?})", policy);
        Self {
            classifier: Classifier::new(policy),
            store: StateStore::new(),
            dispatcher: ActionDispatcher::new(dispatch),
            started: false,
        }
    }

    pub fn from_config(config: &MonitorConfig) -> Self {
        let dispatch = DispatchConfig {
            ansi: config.logging.ansi && !config.logging.json,
        };
        Self::new(config.classification.range_policy, dispatch)
    }

    /// Dispatch the action for the initial overall state. Only the first
    /// call has any effect.
    pub fn start(&mut self) -> Option<Action> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(self.dispatcher.dispatch(self.store.overall().severity))
    }

    /// Feed one reading through the pipeline.
    ///
    /// A rejected reading leaves the store untouched.
    pub fn process(&mut self, reading: Reading) -> Result<Outcome, EngineError> {
        let severity = self.classifier.classify(reading)?;
        self.store.record_reading(reading);

        let component = self.store.update_state(reading.kind, severity);
        let overall = match component {
            Some(_) => self.store.recompute(),
            None => None,
        };
        let action = overall.map(|state| self.dispatcher.dispatch(state.severity));

        debug!(
            "Processed {} {} -> {} (component changed: {}, overall changed: {})",
            reading.kind,
            reading.value,
            severity.label(),
            component.is_some(),
            overall.is_some()
        );

        Ok(Outcome {
            reading,
            severity,
            component,
            overall,
            action,
        })
    }

    pub fn add_sink(&mut self, sink: impl ActionSink + 'static) {
        self.dispatcher.add_sink(sink);
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn overall(&self) -> OverallState {
        self.store.overall()
    }

    pub fn dispatch_count(&self) -> u64 {
        self.dispatcher.dispatch_count()
    }

    pub fn last_action(&self) -> Option<Action> {
        self.dispatcher.last_action()
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(RangePolicy::default(), DispatchConfig::default())
    }
}

/// Engine shared between producer tasks. Each notification holds the lock
/// for the whole pipeline run, so readings are processed one at a time.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<DecisionEngine>>,
}

impl SharedEngine {
    pub fn new(engine: DecisionEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, DecisionEngine> {
        self.inner.lock().await
    }

    pub async fn start(&self) -> Option<Action> {
        self.inner.lock().await.start()
    }

    pub async fn snapshot(&self) -> StoreSnapshot {
        self.inner.lock().await.store().snapshot()
    }
}

#[async_trait]
impl ReadingObserver for SharedEngine {
    async fn notify(&self, reading: Reading) {
        let mut engine = self.inner.lock().await;
        if let Err(e) = engine.process(reading) {
            warn!("Dropping {} reading {}: {}", reading.kind, reading.value, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_dispatch::ActionLog;
    use classifier::SensorKind;

    fn engine_with_log() -> (DecisionEngine, ActionLog) {
        let log = ActionLog::new();
        let mut engine = DecisionEngine::new(RangePolicy::PassThrough, DispatchConfig { ansi: false });
        engine.add_sink(log.clone());
        (engine, log)
    }

    #[test]
    fn test_critical_battery_then_critical_anomaly() {
        let (mut engine, log) = engine_with_log();

        engine.process(Reading::battery(10.0)).unwrap();
        let outcome = engine.process(Reading::anomaly(0.9)).unwrap();

        assert_eq!(outcome.severity, Severity::Critical);
        assert!(outcome.component.is_some());
        // Already Critical from the battery
        assert_eq!(outcome.overall, None);
        assert_eq!(log.last(), Some(Action::EmergencyLanding));
        assert_eq!(engine.overall().severity, Severity::Critical);
    }

    #[test]
    fn test_mild_battery_normal_anomaly() {
        let (mut engine, log) = engine_with_log();

        let outcome = engine.process(Reading::battery(60.0)).unwrap();
        assert_eq!(outcome.action, Some(Action::ReturnHomeSoon));
        engine.process(Reading::anomaly(0.1)).unwrap();

        assert_eq!(log.last(), Some(Action::ReturnHomeSoon));
        assert_eq!(log.last().unwrap().message(), "Consider returning to home soon");
        assert_eq!(engine.overall().severity, Severity::Mild);
    }

    #[test]
    fn test_no_duplicate_dispatch() {
        let (mut engine, log) = engine_with_log();

        engine.process(Reading::battery(70.0)).unwrap();
        let second = engine.process(Reading::battery(60.0)).unwrap();

        assert_eq!(second.component, None);
        assert_eq!(second.action, None);
        assert_eq!(log.len(), 1);
        assert_eq!(engine.dispatch_count(), 1);
    }

    #[test]
    fn test_overall_combinations() {
        let cases = [
            (100.0, 0.1, Severity::Normal),
            (60.0, 0.3, Severity::Mild),
            (60.0, 0.6, Severity::Severe),
            (60.0, 0.9, Severity::Critical),
            (30.0, 0.1, Severity::Severe),
            (30.0, 0.9, Severity::Critical),
            (10.0, 0.1, Severity::Critical),
            (100.0, 0.3, Severity::Mild),
        ];
        for (percent, confidence, expected) in cases {
            let mut engine = DecisionEngine::default();
            engine.process(Reading::battery(percent)).unwrap();
            engine.process(Reading::anomaly(confidence)).unwrap();
            assert_eq!(
                engine.overall().severity,
                expected,
                "battery {} / anomaly {}",
                percent,
                confidence
            );
        }
    }

    #[test]
    fn test_recovery_dispatches_lower_action() {
        let (mut engine, log) = engine_with_log();
        engine.process(Reading::anomaly(0.8)).unwrap();
        engine.process(Reading::anomaly(0.4)).unwrap();
        engine.process(Reading::anomaly(0.1)).unwrap();

        assert_eq!(
            log.actions(),
            [
                Action::EmergencyLanding,
                Action::ReturnHomeSoon,
                Action::ContinueMission,
            ]
        );
    }

    #[test]
    fn test_start_dispatches_initial_state_once() {
        let (mut engine, log) = engine_with_log();
        assert_eq!(engine.start(), Some(Action::ContinueMission));
        assert_eq!(engine.start(), None);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_rejected_reading_leaves_state_untouched() {
        let mut engine = DecisionEngine::new(RangePolicy::Reject, DispatchConfig::default());
        let err = engine.process(Reading::battery(-5.0)).unwrap_err();

        assert!(matches!(err, EngineError::Classify(_)));
        assert_eq!(engine.store().latest_reading(SensorKind::Battery), None);
        assert_eq!(engine.store().component(SensorKind::Battery), None);
        assert_eq!(engine.dispatch_count(), 0);
    }

    #[test]
    fn test_pass_through_negative_battery_is_critical() {
        let mut engine = DecisionEngine::default();
        let outcome = engine.process(Reading::battery(-5.0)).unwrap();
        assert_eq!(outcome.action, Some(Action::EmergencyLanding));
    }

    #[test]
    fn test_json_logging_disables_action_colour() {
        let mut config = MonitorConfig::default();
        config.logging.json = true;
        let engine = DecisionEngine::from_config(&config);
        let line = engine.dispatcher().render(Action::EmergencyLanding);
        assert_eq!(line, "Action: Emergency landing is advised");
        assert!(!line.contains('\x1b'));

        let engine = DecisionEngine::from_config(&MonitorConfig::default());
        assert!(engine.dispatcher().render(Action::EmergencyLanding).starts_with("\x1b[31m"));

        let mut config = MonitorConfig::default();
        config.logging.ansi = false;
        let engine = DecisionEngine::from_config(&config);
        assert!(!engine.dispatcher().render(Action::ContinueMission).contains('\x1b'));
    }

    #[tokio::test]
    async fn test_shared_engine_as_observer() {
        let log = ActionLog::new();
        let shared = SharedEngine::new(DecisionEngine::default());
        shared.lock().await.add_sink(log.clone());

        shared.notify(Reading::battery(30.0)).await;
        shared.notify(Reading::anomaly(f64::NAN)).await;
        shared.notify(Reading::anomaly(0.95)).await;

        assert_eq!(
            log.actions(),
            [Action::ReturnHomeImmediately, Action::EmergencyLanding]
        );
        let snapshot = shared.snapshot().await;
        assert_eq!(snapshot.overall.severity, Severity::Critical);
        assert_eq!(snapshot.components.len(), 2);
    }
}
