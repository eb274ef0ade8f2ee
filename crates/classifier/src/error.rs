//! Classification Error Types

use thiserror::Error;

use crate::reading::SensorKind;

/// Errors raised while preparing a reading for classification
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifyError {
    /// Value outside the sensor's physical domain (only under `RangePolicy::Reject`)
    #[error("{kind} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        kind: SensorKind,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite value
    #[error("{kind} value {value} is not a finite number")]
    NotFinite { kind: SensorKind, value: f64 },
}
