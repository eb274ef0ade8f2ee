//! Simulated battery level

use async_trait::async_trait;
use classifier::{Reading, SensorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::observer::{ObserverList, ReadingObserver};
use crate::producer::Producer;

/// Battery simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryConfig {
    /// Charge at startup (%)
    pub start_percent: f64,
    /// Change per tick (%), negative = draining
    pub step: f64,
    /// Time between readings (milliseconds)
    pub interval_ms: u64,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            start_percent: 100.0,
            step: -10.0,
            interval_ms: 1000,
        }
    }
}

/// Battery that drains and recharges between 0 and 100 %.
///
/// The level is advanced first and reversed afterwards, so a step that does
/// not divide the range evenly overshoots the boundary by less than one step
/// before turning around.
pub struct BatteryProducer {
    percent: f64,
    step: f64,
    interval: Duration,
    observers: ObserverList,
}

impl BatteryProducer {
    pub fn new(config: &BatteryConfig) -> Self {
        Self {
            percent: config.start_percent,
            step: config.step,
            interval: Duration::from_millis(config.interval_ms),
            observers: ObserverList::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ReadingObserver>) {
        self.observers.add(observer);
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

#[async_trait]
impl Producer for BatteryProducer {
    fn name(&self) -> &'static str {
        "battery"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn next_reading(&mut self) -> Reading {
        self.percent += self.step;
        let reading = Reading::new(SensorKind::Battery, self.percent);

        let outward = (self.percent >= 100.0 && self.step > 0.0)
            || (self.percent <= 0.0 && self.step < 0.0);
        if outward {
            // Overshoot past the boundary is kept as-is
            debug!(
                "Battery at {}%, reversing step {} -> {}",
                self.percent, self.step, -self.step
            );
            self.step = -self.step;
        }
        reading
    }

    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}
