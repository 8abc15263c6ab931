//! Timer engine: advances every pending action by one poll.
//!
//! All elapsed-time arithmetic uses `wrapping_sub` on [`Millis`], so a
//! deadline that straddles the `u32` rollover still expires on time.
//! A deadline counts as reached when `elapsed == duration`.

use log::{debug, trace};

use crate::app::ports::{Clock, Millis, OutputPort};

use super::PinSet;
use super::state::{FadePhase, Level, PinMode, PinState};

impl<O: OutputPort, C: Clock> PinSet<O, C> {
    /// Advance every pin with a pending action to time `now`.
    ///
    /// Pins are stepped independently, in configuration order.  Completion
    /// callbacks run inline, at most once per scheduled action.
    pub fn advance(&mut self, now: Millis) {
        let fade_ms = self.fade_duration_ms;
        for state in self.pins.iter_mut().filter(|p| p.timer_active) {
            step(state, &mut self.output, now, fade_ms);
        }
    }
}

fn step(state: &mut PinState, out: &mut impl OutputPort, now: Millis, fade_ms: Millis) {
    let pin = state.id;
    match state.mode {
        PinMode::Fading(FadePhase::Holding) => {
            out.write_analog(pin, state.start_pwm_value);
            if now.wrapping_sub(state.start_time) >= state.duration {
                state.mode = PinMode::Fading(FadePhase::Active);
                state.fade_start_time = now;
                state.duration = fade_ms;
                debug!("pin {}: hold done, fading -> {}", pin, state.finish_pwm_value);
            }
        }

        PinMode::Fading(FadePhase::Active) => {
            let elapsed = now.wrapping_sub(state.fade_start_time);
            if elapsed >= state.duration {
                state.current_value = state.finish_pwm_value;
                out.write_analog(pin, state.current_value);
                state.mode = PinMode::Pwm;
                state.timer_active = false;
                debug!("pin {}: fade complete at {}", pin, state.current_value);
                state.fire_callback();
            } else {
                let duty = interpolate(
                    state.start_pwm_value,
                    state.finish_pwm_value,
                    elapsed,
                    state.duration,
                );
                trace!("pin {}: fade step {}ms -> {}", pin, elapsed, duty);
                out.write_analog(pin, duty);
            }
        }

        PinMode::Digital | PinMode::Pwm => {
            if now.wrapping_sub(state.start_time) >= state.duration {
                state.timer_active = false;
                state.current_value = state.target_value;
                if state.mode.is_digital() {
                    out.write_digital(pin, state.level());
                } else {
                    out.write_analog(pin, state.current_value);
                }
                debug!("pin {}: timer expired, now {}", pin, state.current_value);
                state.fire_callback();
            }
        }
    }
}

/// Duty at `elapsed` ms into a `duration` ms fade from `start` to `finish`,
/// truncated toward zero.  Requires `elapsed < duration`.
pub(crate) fn interpolate(start: u8, finish: u8, elapsed: Millis, duration: Millis) -> u8 {
    let (s, f) = (i64::from(start), i64::from(finish));
    let (e, d) = (i64::from(elapsed), i64::from(duration));
    // s*d + (f-s)*e stays within [min(s,f)*d, max(s,f)*d], so the
    // division never goes negative and the result fits in u8.
    ((s * d + (f - s) * e) / d) as u8
}
