//! Port traits: the boundary between the pin state machine and the outside world.
//!
//! ```text
//!   PinSet (domain) ──▶ OutputPort ──▶ Adapter (GPIO / LEDC / log)
//!   PinSet (domain) ──▶ Clock      ──▶ Adapter (system timer)
//! ```
//!
//! Adapters implement these traits.  [`PinSet`](crate::pins::PinSet)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::pins::PinId;
use crate::pins::state::Level;

/// Monotonic millisecond timestamp.  Wraps at `u32::MAX` (≈ 49.7 days).
pub type Millis = u32;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive pins.
///
/// Writes are fire-and-forget.  An adapter that can fail must log and
/// swallow the failure so one misbehaving pin never stalls the others.
pub trait OutputPort {
    /// Put `pin` into push-pull digital output mode.
    ///
    /// Called once per pin at construction and again whenever a pin moves
    /// from PWM/fading back to digital.
    fn configure_output(&mut self, _pin: PinId) {}

    /// Drive a binary level.
    fn write_digital(&mut self, pin: PinId, level: Level);

    /// Set an 8-bit PWM duty cycle (0 = off, 255 = fully on).
    fn write_analog(&mut self, pin: PinId, duty: u8);
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn configure_output(&mut self, pin: PinId) {
        (**self).configure_output(pin);
    }

    fn write_digital(&mut self, pin: PinId, level: Level) {
        (**self).write_digital(pin, level);
    }

    fn write_analog(&mut self, pin: PinId, duty: u8) {
        (**self).write_analog(pin, duty);
    }
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: system timer → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to stamp actions and polls.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch.  Must be monotonic modulo
    /// wraparound.
    fn now_ms(&self) -> Millis;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> Millis {
        (**self).now_ms()
    }
}
