//! Managed pin set: the timed-action and fade state machine.
//!
//! ```text
//!   host loop ──▶ PinSet::update() ──▶ advance(now) ──▶ OutputPort
//!                      ▲                     │
//!   commands ──▶ set_digital / set_pwm / set_fade ...
//!                      │                     ▼
//!                      └──── PinState × N ───┘ ──▶ completion callbacks
//! ```
//!
//! | Module     | Responsibility                                       |
//! |------------|------------------------------------------------------|
//! | `state`    | per-pin record, modes, levels                        |
//! | `dispatch` | start immediate, timed, and faded actions            |
//! | `engine`   | advance every pending action by one poll             |
//! | `status`   | read-only {mode, value} projections and JSON         |
//!
//! Everything runs in the caller's context: there are no threads, no
//! interrupts, and no blocking.  Timing resolution is the host's polling
//! cadence; an action fires at the first poll at or after its deadline.

pub mod dispatch;
pub mod engine;
pub mod state;
pub mod status;

use log::{debug, info};

use crate::app::ports::{Clock, Millis, OutputPort};
use crate::config::{MAX_PINS, PinSetConfig};
use crate::error::Error;

use state::{Level, PinState};

/// Hardware pin identifier (GPIO number).
pub type PinId = i32;

/// A fixed set of output pins and their pending actions.
///
/// Owns the [`OutputPort`] it drives and the [`Clock`] it stamps actions
/// with.  Membership is fixed at construction.
#[derive(Debug)]
pub struct PinSet<O: OutputPort, C: Clock> {
    pins: heapless::Vec<PinState, MAX_PINS>,
    output: O,
    clock: C,
    fade_duration_ms: Millis,
}

impl<O: OutputPort, C: Clock> PinSet<O, C> {
    /// Validate `config`, configure every pin as an output, and drive it LOW.
    pub fn new(config: &PinSetConfig, mut output: O, clock: C) -> Result<Self, Error> {
        config.validate()?;

        let mut pins = heapless::Vec::new();
        for &id in &config.pins {
            output.configure_output(id);
            output.write_digital(id, Level::Low);
            // Capacity matches PinSetConfig::pins, so this cannot overflow.
            let _ = pins.push(PinState::new(id));
        }

        info!(
            "PinSet: managing {} pin(s) {:?}, fade={}ms",
            pins.len(),
            config.pins.as_slice(),
            config.fade_duration_ms
        );

        Ok(Self {
            pins,
            output,
            clock,
            fade_duration_ms: config.fade_duration_ms,
        })
    }

    /// Sample the clock once and advance every pending action.
    ///
    /// Call on every iteration of the host loop.
    pub fn update(&mut self) {
        let now = self.clock.now_ms();
        self.advance(now);
    }

    // ── Introspection ─────────────────────────────────────────

    /// Managed pin ids, in configuration order.
    pub fn pins(&self) -> impl Iterator<Item = PinId> + '_ {
        self.pins.iter().map(PinState::id)
    }

    /// Read-only view of one pin's state.
    pub fn pin(&self, pin: PinId) -> Option<&PinState> {
        self.pins.iter().find(|p| p.id == pin)
    }

    pub fn is_managed(&self, pin: PinId) -> bool {
        self.pin(pin).is_some()
    }

    /// Whether `pin` has a timed action or fade in flight.
    pub fn has_pending(&self, pin: PinId) -> bool {
        self.pin(pin).is_some_and(PinState::has_pending)
    }

    /// Number of pins with an action in flight.
    pub fn pending_count(&self) -> usize {
        self.pins.iter().filter(|p| p.has_pending()).count()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn fade_duration_ms(&self) -> Millis {
        self.fade_duration_ms
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Tear down, handing back the adapters.
    pub fn into_parts(self) -> (O, C) {
        (self.output, self.clock)
    }

    // ── Internal ──────────────────────────────────────────────

    /// Borrow a pin's state together with the output port.
    fn slot(&mut self, pin: PinId) -> Option<(&mut PinState, &mut O)> {
        match self.pins.iter_mut().find(|p| p.id == pin) {
            Some(state) => Some((state, &mut self.output)),
            None => {
                debug!("PinSet: ignoring request for unmanaged pin {}", pin);
                None
            }
        }
    }
}
