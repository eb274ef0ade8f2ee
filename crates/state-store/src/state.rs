//! State facts

use classifier::{SensorKind, Severity};
use serde::Serialize;

/// Classified state of one sensor kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentState {
    pub kind: SensorKind,
    pub severity: Severity,
    /// Human-readable severity label
    pub label: &'static str,
}

impl ComponentState {
    pub fn new(kind: SensorKind, severity: Severity) -> Self {
        Self {
            kind,
            severity,
            label: severity.label(),
        }
    }
}

/// Overall drone state: the most severe of all component states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallState {
    pub severity: Severity,
    pub label: &'static str,
}

impl OverallState {
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            label: severity.label(),
        }
    }
}

impl Default for OverallState {
    fn default() -> Self {
        Self::new(Severity::Normal)
    }
}

/// Point-in-time copy of the store, for reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub overall: OverallState,
    pub components: Vec<ComponentState>,
    /// Number of state facts inserted since startup
    pub state_changes: u64,
}
