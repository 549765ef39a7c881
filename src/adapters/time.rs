//! Monotonic time adapter.
//!
//! Wraps `std::time::Instant`; the origin is the moment the clock was
//! created.  `Copy`, so the rangefinder and the control loop each hold their
//! own handle onto the same origin.

use std::time::Instant;

use crate::app::ports::TimePort;

#[derive(Debug, Clone, Copy)]
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
}

impl TimePort for MonotonicClock {
    fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}
