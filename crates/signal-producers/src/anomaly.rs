//! Simulated anomaly detector

use async_trait::async_trait;
use classifier::{Reading, SensorKind};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::observer::{ObserverList, ReadingObserver};
use crate::producer::Producer;

/// Anomaly simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    /// Time between readings (milliseconds)
    pub interval_ms: u64,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            seed: None,
        }
    }
}

/// Emits a uniformly random detection confidence in [0, 1) each tick
pub struct AnomalyProducer {
    rng: SmallRng,
    interval: Duration,
    observers: ObserverList,
}

impl AnomalyProducer {
    pub fn new(config: &AnomalyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            rng,
            interval: Duration::from_millis(config.interval_ms),
            observers: ObserverList::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Arc<dyn ReadingObserver>) {
        self.observers.add(observer);
    }
}

#[async_trait]
impl Producer for AnomalyProducer {
    fn name(&self) -> &'static str {
        "anomaly"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    fn next_reading(&mut self) -> Reading {
        Reading::new(SensorKind::Anomaly, self.rng.gen::<f64>())
    }

    fn observers(&self) -> &ObserverList {
        &self.observers
    }
}
