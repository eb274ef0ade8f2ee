//! Action Dispatcher Implementation

use classifier::Severity;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::action::Action;

/// Dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Colour the action line with ANSI escapes
    pub ansi: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { ansi: true }
    }
}

/// Receiver of dispatched actions
pub trait ActionSink: Send {
    fn on_action(&mut self, severity: Severity, action: Action);
}

/// Shared in-memory record of dispatched actions
#[derive(Debug, Clone, Default)]
pub struct ActionLog {
    entries: Arc<Mutex<Vec<(Severity, Action)>>>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Severity, Action)> {
        self.entries.lock().clone()
    }

    pub fn actions(&self) -> Vec<Action> {
        self.entries.lock().iter().map(|(_, action)| *action).collect()
    }

    pub fn last(&self) -> Option<Action> {
        self.entries.lock().last().map(|(_, action)| *action)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ActionSink for ActionLog {
    fn on_action(&mut self, severity: Severity, action: Action) {
        self.entries.lock().push((severity, action));
    }
}

/// Emits the action for each overall severity it is handed
pub struct ActionDispatcher {
    config: DispatchConfig,
    sinks: Vec<Box<dyn ActionSink>>,
    /// Number of dispatches so far
    dispatch_count: u64,
    last: Option<Action>,
}

impl ActionDispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        debug!("Creating action dispatcher with config: {:?}", config);
        Self {
            config,
            sinks: Vec::new(),
            dispatch_count: 0,
            last: None,
        }
    }

    /// Register an additional receiver
    pub fn add_sink(&mut self, sink: impl ActionSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    /// Emit the action for `severity`
    pub fn dispatch(&mut self, severity: Severity) -> Action {
        let action = Action::for_severity(severity);
        info!("{}", self.render(action));

        for sink in &mut self.sinks {
            sink.on_action(severity, action);
        }
        self.dispatch_count += 1;
        self.last = Some(action);
        action
    }

    /// Log line for `action`, coloured if configured
    pub fn render(&self, action: Action) -> String {
        action.render(self.config.ansi)
    }

    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    pub fn last_action(&self) -> Option<Action> {
        self.last
    }
}

impl Default for ActionDispatcher {
    fn default() -> Self {
        Self::new(DispatchConfig::default())
    }
}
