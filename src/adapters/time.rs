//! Host time adapter.
//!
//! Provides the monotonic millisecond clock the pin set stamps actions
//! with.  Backed by `std::time::Instant`; the reading is truncated to
//! `u32`, so it wraps after ≈ 49.7 days exactly like a microcontroller's
//! millisecond tick counter.

use std::time::Instant;

use crate::app::ports::{Clock, Millis};

/// Wrapping millisecond clock for host builds and simulation.
pub struct SystemClock {
    start: Instant,
    offset_ms: Millis,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Clock whose first reading is `offset_ms`.  Useful to exercise the
    /// rollover without waiting seven weeks.
    pub fn starting_at(offset_ms: Millis) -> Self {
        Self {
            start: Instant::now(),
            offset_ms,
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        (self.start.elapsed().as_millis() as Millis).wrapping_add(self.offset_ms)
    }
}
