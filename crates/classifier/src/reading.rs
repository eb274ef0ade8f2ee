//! Readings, sensor kinds and severity levels

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::thresholds::Thresholds;

/// Source of a reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Remaining battery charge in percent
    Battery,
    /// Confidence of the anomaly detector
    Anomaly,
}

impl SensorKind {
    /// Every kind that contributes to the overall state
    pub const ALL: [SensorKind; 2] = [SensorKind::Battery, SensorKind::Anomaly];

    /// Short machine name
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::Battery => "battery",
            SensorKind::Anomaly => "anomaly",
        }
    }

    /// Name used in state log lines ("Battery State 2: Severe")
    pub fn display_name(&self) -> &'static str {
        match self {
            SensorKind::Battery => "Battery",
            SensorKind::Anomaly => "Sensor Anomaly",
        }
    }

    /// Physical domain of the reading, inclusive on both ends
    pub fn domain(&self) -> (f64, f64) {
        match self {
            SensorKind::Battery => (0.0, 100.0),
            SensorKind::Anomaly => (0.0, 1.0),
        }
    }

    /// Fixed severity breakpoints for this kind
    pub fn thresholds(&self) -> Thresholds {
        match self {
            SensorKind::Battery => Thresholds::battery(),
            SensorKind::Anomaly => Thresholds::anomaly(),
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single sensor sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub kind: SensorKind,
    pub value: f64,
}

impl Reading {
    pub fn new(kind: SensorKind, value: f64) -> Self {
        Self { kind, value }
    }

    pub fn battery(percent: f64) -> Self {
        Self::new(SensorKind::Battery, percent)
    }

    pub fn anomaly(confidence: f64) -> Self {
        Self::new(SensorKind::Anomaly, confidence)
    }
}

/// Discrete severity level, ordered from least to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Severity {
    #[default]
    Normal,
    Mild,
    Severe,
    Critical,
}

impl Severity {
    /// All levels in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Normal,
        Severity::Mild,
        Severity::Severe,
        Severity::Critical,
    ];

    /// Numeric level (0 = Normal .. 3 = Critical)
    pub fn level(&self) -> u8 {
        match self {
            Severity::Normal => 0,
            Severity::Mild => 1,
            Severity::Severe => 2,
            Severity::Critical => 3,
        }
    }

    /// Inverse of [`Severity::level`]
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(level as usize).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "Normal",
            Severity::Mild => "Mild",
            Severity::Severe => "Severe",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level(), self.label())
    }
}
