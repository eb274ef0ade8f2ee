//! Observer fan-out

use async_trait::async_trait;
use classifier::Reading;
use std::sync::Arc;

/// Consumer of produced readings.
///
/// `notify` returns once the reading has been fully processed; the producer
/// does not emit its next reading before that.
#[async_trait]
pub trait ReadingObserver: Send + Sync {
    async fn notify(&self, reading: Reading);
}

/// Ordered list of observers, notified one after another
#[derive(Clone, Default)]
pub struct ObserverList {
    observers: Vec<Arc<dyn ReadingObserver>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: Arc<dyn ReadingObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notify every observer in registration order
    pub async fn broadcast(&self, reading: Reading) {
        for observer in &self.observers {
            observer.notify(reading).await;
        }
    }
}
