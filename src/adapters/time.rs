//! Monotonic time adapter.
//!
//! Implements [`TimePort`] on top of `std::time::Instant`, measuring from
//! the moment the adapter was created (process start in the host binary).

use std::time::Instant;

use crate::app::ports::TimePort;

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since start (monotonic).
    pub fn uptime_secs(&self) -> u64 {
        self.start.elapsed().as_secs()
    }
}

impl TimePort for MonotonicClock {
    fn uptime_ms(&self) -> u64 {
        // u64 milliseconds cover several hundred million years.
        self.start.elapsed().as_millis() as u64
    }
}
