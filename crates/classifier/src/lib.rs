//! Severity Classification
//!
//! Maps raw battery and anomaly readings onto the four discrete severity
//! levels used by the rest of the monitor.

mod error;
mod policy;
mod reading;
mod thresholds;

pub use error::ClassifyError;
pub use policy::{Classifier, RangePolicy};
pub use reading::{Reading, SensorKind, Severity};
pub use thresholds::{classify, Direction, Thresholds};
