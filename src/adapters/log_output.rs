//! Log-based output adapter.
//!
//! Implements [`OutputPort`] by writing every pin change to the logger
//! (serial console on a board, stderr in the simulator).  Keeps the last
//! value written to each pin so a simulation can print a summary.
//! Repeated identical writes (hold plateaus re-assert their duty every
//! poll) are logged at `trace` only.

use log::{info, trace};

use crate::app::ports::OutputPort;
use crate::config::MAX_PINS;
use crate::pins::PinId;
use crate::pins::state::Level;

/// Last write seen on a pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    Digital(Level),
    Analog(u8),
}

/// Adapter that logs every write instead of touching hardware.
#[derive(Debug, Default)]
pub struct LogOutput {
    last: heapless::Vec<(PinId, Written), MAX_PINS>,
    writes: u64,
}

impl LogOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last value written to `pin`, if any.
    pub fn last(&self, pin: PinId) -> Option<Written> {
        self.last
            .iter()
            .find(|(id, _)| *id == pin)
            .map(|(_, w)| *w)
    }

    /// Total number of writes seen.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Record `value`; returns `true` if it differs from the previous write.
    fn record(&mut self, pin: PinId, value: Written) -> bool {
        self.writes += 1;
        match self.last.iter_mut().find(|(id, _)| *id == pin) {
            Some((_, prev)) => {
                let changed = *prev != value;
                *prev = value;
                changed
            }
            None => {
                let _ = self.last.push((pin, value));
                true
            }
        }
    }
}

impl OutputPort for LogOutput {
    fn configure_output(&mut self, pin: PinId) {
        info!("OUT  | pin {:>2} configured as output", pin);
    }

    fn write_digital(&mut self, pin: PinId, level: Level) {
        if self.record(pin, Written::Digital(level)) {
            info!("OUT  | pin {:>2} digital {}", pin, level);
        } else {
            trace!("OUT  | pin {:>2} digital {} (unchanged)", pin, level);
        }
    }

    fn write_analog(&mut self, pin: PinId, duty: u8) {
        if self.record(pin, Written::Analog(duty)) {
            info!("OUT  | pin {:>2} duty {:>3}", pin, duty);
        } else {
            trace!("OUT  | pin {:>2} duty {:>3} (unchanged)", pin, duty);
        }
    }
}
