//! Fixed severity breakpoints

use crate::reading::{SensorKind, Severity};

/// Which way severity moves as the value grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Lower values are worse (battery charge)
    Falling,
    /// Higher values are worse (anomaly confidence)
    Rising,
}

/// Three ascending breakpoints splitting a value range into four buckets.
///
/// A value sitting exactly on a breakpoint always belongs to the less severe
/// of the two neighbouring buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Ascending breakpoints
    breakpoints: [f64; 3],
    direction: Direction,
}

impl Thresholds {
    /// Battery: > 75 Normal, > 50 Mild, > 25 Severe, otherwise Critical
    pub const fn battery() -> Self {
        Self {
            breakpoints: [25.0, 50.0, 75.0],
            direction: Direction::Falling,
        }
    }

    /// Anomaly: <= 0.25 Normal, <= 0.5 Mild, <= 0.75 Severe, otherwise Critical
    pub const fn anomaly() -> Self {
        Self {
            breakpoints: [0.25, 0.5, 0.75],
            direction: Direction::Rising,
        }
    }

    pub fn breakpoints(&self) -> [f64; 3] {
        self.breakpoints
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Bucket a value. Anything past the last breakpoint (including values
    /// outside the sensor domain) lands in Critical.
    pub fn bucket(&self, value: f64) -> Severity {
        let [low, mid, high] = self.breakpoints;
        match self.direction {
            Direction::Falling => {
                if value > high {
                    Severity::Normal
                } else if value > mid {
                    Severity::Mild
                } else if value > low {
                    Severity::Severe
                } else {
                    Severity::Critical
                }
            }
            Direction::Rising => {
                if value <= low {
                    Severity::Normal
                } else if value <= mid {
                    Severity::Mild
                } else if value <= high {
                    Severity::Severe
                } else {
                    Severity::Critical
                }
            }
        }
    }
}

/// Classify a raw value of the given kind using the fixed thresholds
pub fn classify(kind: SensorKind, value: f64) -> Severity {
    kind.thresholds().bucket(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_battery_buckets() {
        assert_eq!(classify(SensorKind::Battery, 100.0), Severity::Normal);
        assert_eq!(classify(SensorKind::Battery, 60.0), Severity::Mild);
        assert_eq!(classify(SensorKind::Battery, 30.0), Severity::Severe);
        assert_eq!(classify(SensorKind::Battery, 10.0), Severity::Critical);
    }

    #[test]
    fn test_anomaly_buckets() {
        assert_eq!(classify(SensorKind::Anomaly, 0.1), Severity::Normal);
        assert_eq!(classify(SensorKind::Anomaly, 0.3), Severity::Mild);
        assert_eq!(classify(SensorKind::Anomaly, 0.6), Severity::Severe);
        assert_eq!(classify(SensorKind::Anomaly, 0.9), Severity::Critical);
    }

    #[test]
    fn test_breakpoints_belong_to_lower_bucket() {
        assert_eq!(classify(SensorKind::Battery, 75.0), Severity::Mild);
        assert_eq!(classify(SensorKind::Battery, 75.0001), Severity::Normal);
        assert_eq!(classify(SensorKind::Battery, 50.0), Severity::Severe);
        assert_eq!(classify(SensorKind::Battery, 25.0), Severity::Critical);

        assert_eq!(classify(SensorKind::Anomaly, 0.25), Severity::Normal);
        assert_eq!(classify(SensorKind::Anomaly, 0.2500001), Severity::Mild);
        assert_eq!(classify(SensorKind::Anomaly, 0.5), Severity::Mild);
        assert_eq!(classify(SensorKind::Anomaly, 0.75), Severity::Severe);
        assert_eq!(classify(SensorKind::Anomaly, 1.0), Severity::Critical);
    }

    #[test]
    fn test_fixed_thresholds_are_ascending() {
        for kind in SensorKind::ALL {
            let [low, mid, high] = kind.thresholds().breakpoints();
            assert!(low < mid && mid < high, "{} breakpoints out of order", kind);
        }
        assert_eq!(Thresholds::battery().direction(), Direction::Falling);
        assert_eq!(Thresholds::anomaly().direction(), Direction::Rising);
    }

    #[test]
    fn test_out_of_domain_falls_through_to_critical() {
        assert_eq!(classify(SensorKind::Battery, -5.0), Severity::Critical);
        assert_eq!(classify(SensorKind::Anomaly, 1.5), Severity::Critical);
        // Above the domain on the good side stays Normal
        assert_eq!(classify(SensorKind::Battery, 105.0), Severity::Normal);
        assert_eq!(classify(SensorKind::Anomaly, -0.2), Severity::Normal);
    }

    proptest! {
        #[test]
        fn battery_severity_never_rises_with_charge(a in -50.0f64..150.0, b in -50.0f64..150.0) {
            let (hi, lo) = if a > b { (a, b) } else { (b, a) };
            prop_assert!(classify(SensorKind::Battery, hi) <= classify(SensorKind::Battery, lo));
        }

        #[test]
        fn anomaly_severity_never_falls_with_confidence(a in -1.0f64..2.0, b in -1.0f64..2.0) {
            let (hi, lo) = if a > b { (a, b) } else { (b, a) };
            prop_assert!(classify(SensorKind::Anomaly, hi) >= classify(SensorKind::Anomaly, lo));
        }

        #[test]
        fn battery_severity_is_a_valid_level(v in any::<f64>()) {
            prop_assert!(classify(SensorKind::Battery, v).level() <= 3);
        }
    }
}
