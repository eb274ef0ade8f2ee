//! Signal Producers
//!
//! Timed generators of synthetic battery and anomaly readings. Every reading
//! is pushed to the registered observers in registration order before the
//! producer sleeps again.

mod anomaly;
mod battery;
mod observer;
mod producer;

pub use anomaly::{AnomalyConfig, AnomalyProducer};
pub use battery::{BatteryConfig, BatteryProducer};
pub use observer::{ObserverList, ReadingObserver};
pub use producer::{Producer, StopSignal};
