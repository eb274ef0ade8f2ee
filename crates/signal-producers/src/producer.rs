//! Producer loop and cooperative stop signal

use async_trait::async_trait;
use classifier::Reading;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::observer::ObserverList;

/// Cooperative stop flag shared between a producer and its owner
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every producer holding this signal to stop after its current tick
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// A timed, infinite source of readings
#[async_trait]
pub trait Producer: Send {
    /// Name used in log lines
    fn name(&self) -> &'static str;

    /// Delay before each reading
    fn interval(&self) -> Duration;

    /// Advance the simulation by one step without sleeping
    fn next_reading(&mut self) -> Reading;

    fn observers(&self) -> &ObserverList;

    /// Produce readings until `stop` is raised.
    ///
    /// The flag is only checked around the sleep, so a notification in
    /// progress always completes. Returns the number of readings emitted.
    async fn run(&mut self, stop: StopSignal) -> u64 {
        info!(
            "Starting {} producer (interval {:?}, {} observers)",
            self.name(),
            self.interval(),
            self.observers().len()
        );

        let mut emitted = 0u64;
        while !stop.is_stopped() {
            tokio::time::sleep(self.interval()).await;
            if stop.is_stopped() {
                break;
            }

            let reading = self.next_reading();
            debug!("{} producer emitting {}", self.name(), reading.value);
            self.observers().broadcast(reading).await;
            emitted += 1;
        }

        info!("{} producer stopped after {} readings", self.name(), emitted);
        emitted
    }
}
