//! Range policy and the policy-aware classifier

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClassifyError;
use crate::reading::{Reading, Severity};
use crate::thresholds::classify;

/// How readings outside the sensor domain are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePolicy {
    /// Classify the raw value unchanged (out-of-domain values usually end up Critical)
    #[default]
    PassThrough,
    /// Clamp into the domain before classifying
    Clamp,
    /// Refuse the reading
    Reject,
}

impl RangePolicy {
    /// Apply the policy, returning the reading that should be classified
    pub fn apply(&self, reading: Reading) -> Result<Reading, ClassifyError> {
        if !reading.value.is_finite() {
            return Err(ClassifyError::NotFinite {
                kind: reading.kind,
                value: reading.value,
            });
        }

        let (min, max) = reading.kind.domain();
        if (min..=max).contains(&reading.value) {
            return Ok(reading);
        }

        match self {
            RangePolicy::PassThrough => {
                warn!(
                    "{} value {} outside [{}, {}], classifying as-is",
                    reading.kind, reading.value, min, max
                );
                Ok(reading)
            }
            RangePolicy::Clamp => {
                let clamped = reading.value.clamp(min, max);
                debug!("Clamped {} value {} to {}", reading.kind, reading.value, clamped);
                Ok(Reading::new(reading.kind, clamped))
            }
            RangePolicy::Reject => Err(ClassifyError::OutOfRange {
                kind: reading.kind,
                value: reading.value,
                min,
                max,
            }),
        }
    }
}

/// Classifier applying a [`RangePolicy`] ahead of the fixed thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    policy: RangePolicy,
}

impl Classifier {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Classify a reading
    pub fn classify(&self, reading: Reading) -> Result<Severity, ClassifyError> {
        let reading = self.policy.apply(reading)?;
        let severity = classify(reading.kind, reading.value);
        debug!(
            "{} reading {} -> {} State {}",
            reading.kind,
            reading.value,
            reading.kind.display_name(),
            severity
        );
        Ok(severity)
    }
}
