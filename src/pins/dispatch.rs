//! Action dispatch: starting immediate, timed, and faded actions.
//!
//! Every operation:
//!
//! - is a silent no-op for pins outside the managed set,
//! - clamps duty values to 0–255 instead of rejecting them,
//! - performs exactly one hardware write before returning,
//! - replaces whatever was in flight on the pin.  A superseded callback is
//!   dropped without ever running.
//!
//! Delays and hold lengths are whole seconds; the fade window itself is
//! configured in milliseconds.

use log::debug;

use crate::app::ports::{Clock, Millis, OutputPort};

use super::state::{Completion, FadePhase, Level, PinMode};
use super::{PinId, PinSet};

/// Clamp an arbitrary integer into the 8-bit duty domain.
pub fn clamp_duty(value: i32) -> u8 {
    value.clamp(0, i32::from(u8::MAX)) as u8
}

/// Convert a delay in seconds to clock ticks, saturating at `Millis::MAX`.
pub fn secs_to_ms(secs: u32) -> Millis {
    secs.saturating_mul(1000)
}

/// Duty applied when a timed PWM action expires: full on if the pin was
/// driven to 0, otherwise off.
fn pwm_revert_value(duty: u8) -> u8 {
    if duty == 0 { u8::MAX } else { 0 }
}

impl<O: OutputPort, C: Clock> PinSet<O, C> {
    // ── Digital ───────────────────────────────────────────────

    /// Drive `pin` to `level` and cancel anything pending on it.
    pub fn set_digital(&mut self, pin: PinId, level: Level) {
        let Some((state, out)) = self.slot(pin) else {
            return;
        };

        state.cancel();
        if !state.mode.is_digital() {
            out.configure_output(pin);
        }
        state.mode = PinMode::Digital;
        state.current_value = level.as_u8();
        out.write_digital(pin, level);
        debug!("pin {}: digital {}", pin, level);
    }

    /// Drive `pin` to `level` now and to the opposite level after
    /// `delay_secs` seconds, then run `callback`.
    pub fn set_digital_timed(
        &mut self,
        pin: PinId,
        level: Level,
        delay_secs: u32,
        callback: Option<Completion>,
    ) {
        let delay_ms = secs_to_ms(delay_secs);
        let now = self.clock.now_ms();
        let Some((state, out)) = self.slot(pin) else {
            return;
        };

        if !state.mode.is_digital() {
            out.configure_output(pin);
        }
        state.mode = PinMode::Digital;
        state.current_value = level.as_u8();
        out.write_digital(pin, level);

        state.arm(now, delay_ms, callback);
        state.target_value = (!level).as_u8();
        debug!(
            "pin {}: digital {} for {}ms, then {}",
            pin, level, delay_ms, !level
        );
    }

    // ── PWM ───────────────────────────────────────────────────

    /// Set a steady duty cycle and cancel anything pending on `pin`.
    pub fn set_pwm(&mut self, pin: PinId, duty: i32) {
        let duty = clamp_duty(duty);
        let Some((state, out)) = self.slot(pin) else {
            return;
        };

        state.cancel();
        state.mode = PinMode::Pwm;
        state.current_value = duty;
        out.write_analog(pin, duty);
        debug!("pin {}: pwm {}", pin, duty);
    }

    /// Set `duty` now and revert after `delay_secs` seconds, then run
    /// `callback`.
    ///
    /// The revert is not to the previous duty: a pin driven to 0 reverts to
    /// 255, anything else reverts to 0.
    pub fn set_pwm_timed(
        &mut self,
        pin: PinId,
        duty: i32,
        delay_secs: u32,
        callback: Option<Completion>,
    ) {
        let duty = clamp_duty(duty);
        let delay_ms = secs_to_ms(delay_secs);
        let now = self.clock.now_ms();
        let Some((state, out)) = self.slot(pin) else {
            return;
        };

        state.mode = PinMode::Pwm;
        state.current_value = duty;
        out.write_analog(pin, duty);

        state.arm(now, delay_ms, callback);
        state.target_value = pwm_revert_value(duty);
        debug!(
            "pin {}: pwm {} for {}ms, then {}",
            pin, duty, delay_ms, state.target_value
        );
    }

    // ── Fades ─────────────────────────────────────────────────

    /// Fade from `start_duty` to `end_duty` over the configured fade window,
    /// starting immediately.
    pub fn set_fade(&mut self, pin: PinId, start_duty: i32, end_duty: i32) {
        let (start, finish) = (clamp_duty(start_duty), clamp_duty(end_duty));
        let now = self.clock.now_ms();
        let fade_ms = self.fade_duration_ms;
        let Some((state, out)) = self.slot(pin) else {
            return;
        };

        state.mode = PinMode::Fading(FadePhase::Active);
        state.arm(now, fade_ms, None);
        state.fade_start_time = now;
        state.start_pwm_value = start;
        state.finish_pwm_value = finish;
        state.current_value = start;
        out.write_analog(pin, start);
        debug!("pin {}: fade {} -> {} over {}ms", pin, start, finish, fade_ms);
    }

    /// Hold `start_duty` for `hold_secs` seconds, then fade to `end_duty` over the
    /// configured fade window and run `callback` once the fade lands.
    pub fn set_fade_with_hold(
        &mut self,
        pin: PinId,
        start_duty: i32,
        end_duty: i32,
        hold_secs: u32,
        callback: Option<Completion>,
    ) {
        let (start, finish) = (clamp_duty(start_duty), clamp_duty(end_duty));
        let hold_ms = secs_to_ms(hold_secs);
        let now = self.clock.now_ms();
        let Some((state, out)) = self.slot(pin) else {
            return;
        };

        state.mode = PinMode::Fading(FadePhase::Holding);
        state.arm(now, hold_ms, callback);
        state.fade_start_time = 0;
        state.start_pwm_value = start;
        state.finish_pwm_value = finish;
        state.current_value = start;
        out.write_analog(pin, start);
        debug!(
            "pin {}: hold {} for {}ms, then fade -> {}",
            pin, start, hold_ms, finish
        );
    }
}
