//! Fact Store Implementation

use classifier::{Reading, SensorKind, Severity};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::state::{ComponentState, OverallState, StoreSnapshot};

/// Identifier handed out to every inserted fact
pub type FactId = u64;

#[derive(Debug, Clone, Copy)]
struct Fact<T> {
    id: FactId,
    value: T,
}

/// Owned store of the drone's classification facts.
///
/// Facts are never edited in place: a change retracts the old fact and
/// inserts a new one with a fresh id.
#[derive(Debug)]
pub struct StateStore {
    /// Next fact id to hand out
    next_id: FactId,
    /// State facts (component + overall) inserted since startup
    state_changes: u64,
    /// Latest raw reading per kind
    readings: HashMap<SensorKind, Fact<Reading>>,
    /// Classified state per kind
    components: HashMap<SensorKind, Fact<ComponentState>>,
    /// Derived overall state
    overall: Fact<OverallState>,
}

impl StateStore {
    /// Create a store holding only the initial Normal overall state
    pub fn new() -> Self {
        info!("Overall State {}", Severity::Normal);
        Self {
            next_id: 1,
            state_changes: 0,
            readings: HashMap::new(),
            components: HashMap::new(),
            overall: Fact {
                id: 0,
                value: OverallState::default(),
            },
        }
    }

    fn allocate_id(&mut self) -> FactId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the latest reading of the reading's kind
    pub fn record_reading(&mut self, reading: Reading) -> FactId {
        let id = self.allocate_id();
        if let Some(old) = self.readings.insert(reading.kind, Fact { id, value: reading }) {
            debug!("Retracted {} reading fact #{}", reading.kind, old.id);
        }
        id
    }

    /// Store a new severity for `kind`.
    ///
    /// Returns `None` without touching the store when the severity is
    /// unchanged, otherwise the newly inserted component state.
    pub fn update_state(&mut self, kind: SensorKind, severity: Severity) -> Option<ComponentState> {
        if let Some(current) = self.components.get(&kind) {
            if current.value.severity == severity {
                debug!("{} State unchanged at {}", kind.display_name(), severity);
                return None;
            }
        }

        let state = ComponentState::new(kind, severity);
        let id = self.allocate_id();
        match self.components.insert(kind, Fact { id, value: state }) {
            Some(old) => debug!("Replaced {} state fact #{} with #{}", kind, old.id, id),
            None => debug!("Created {} state fact #{}", kind, id),
        }
        self.state_changes += 1;

        info!("{} State {}", kind.display_name(), severity);
        Some(state)
    }

    /// Recompute the overall state as the maximum component severity.
    ///
    /// Returns the new overall state only if it changed.
    pub fn recompute(&mut self) -> Option<OverallState> {
        let severity = SensorKind::ALL
            .iter()
            .map(|kind| self.severity(*kind))
            .max()
            .unwrap_or_default();

        if severity == self.overall.value.severity {
            debug!("Overall State unchanged at {}", severity);
            return None;
        }

        let state = OverallState::new(severity);
        let id = self.allocate_id();
        debug!("Replaced overall state fact #{} with #{}", self.overall.id, id);
        self.overall = Fact { id, value: state };
        self.state_changes += 1;

        info!("Overall State {}", severity);
        Some(state)
    }

    /// Current severity of `kind`, Normal if nothing was classified yet
    pub fn severity(&self, kind: SensorKind) -> Severity {
        self.components
            .get(&kind)
            .map(|fact| fact.value.severity)
            .unwrap_or_default()
    }

    pub fn component(&self, kind: SensorKind) -> Option<ComponentState> {
        self.components.get(&kind).map(|fact| fact.value)
    }

    pub fn overall(&self) -> OverallState {
        self.overall.value
    }

    pub fn latest_reading(&self, kind: SensorKind) -> Option<Reading> {
        self.readings.get(&kind).map(|fact| fact.value)
    }

    /// Id of the current component fact for `kind`
    pub fn component_fact_id(&self, kind: SensorKind) -> Option<FactId> {
        self.components.get(&kind).map(|fact| fact.id)
    }

    pub fn overall_fact_id(&self) -> FactId {
        self.overall.id
    }

    /// Number of component and overall facts inserted since startup
    pub fn state_changes(&self) -> u64 {
        self.state_changes
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        let components = SensorKind::ALL
            .iter()
            .filter_map(|kind| self.component(*kind))
            .collect();
        StoreSnapshot {
            overall: self.overall(),
            components,
            state_changes: self.state_changes,
        }
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}
