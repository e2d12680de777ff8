//! Randomized politeness delay between consecutive requests

use crate::crawler::Deadline;
use rand::{rng, Rng};
use std::time::Duration;

/// Sleeps a uniformly random time in `[min, max]` milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    min_ms: u64,
    max_ms: u64,
}

impl Pacer {
    /// Bounds are swapped if given in the wrong order
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// A pacer that never waits
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Draws the next delay
    pub fn next_delay(&self) -> Duration {
        if self.max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rng().random_range(self.min_ms..=self.max_ms))
    }

    /// Waits one delay, returning `false` if the deadline cut it short
    pub async fn pause(&self, deadline: &Deadline) -> bool {
        let delay = self.next_delay();
        if delay.is_zero() {
            return !deadline.is_expired();
        }
        tracing::trace!("Sleeping {:?}", delay);
        deadline.run(tokio::time::sleep(delay)).await.is_some()
    }
}
