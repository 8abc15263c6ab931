//! `embedded-hal` output adapter.
//!
//! Bridges HAL pin drivers to [`OutputPort`].  Each managed pin is backed by
//! one driver that can act both as a push-pull output
//! ([`OutputPin`]) and as a PWM channel ([`SetDutyCycle`]).  Duty is mapped
//! onto the driver's native resolution with `set_duty_cycle_fraction(d, 255)`.
//!
//! Driver errors are logged and swallowed per pin: a failing channel never
//! stops the state machine from driving the others.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::OutputPort;
use crate::config::MAX_PINS;
use crate::pins::PinId;
use crate::pins::state::Level;

/// Concrete adapter that owns one HAL driver per pin.
pub struct HalOutputs<P> {
    channels: heapless::Vec<(PinId, P), MAX_PINS>,
}

impl<P> Default for HalOutputs<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> HalOutputs<P> {
    pub fn new() -> Self {
        Self {
            channels: heapless::Vec::new(),
        }
    }

    /// Attach the driver for `pin`.  Hands the driver back if the adapter
    /// is full or `pin` already has one.
    pub fn attach(&mut self, pin: PinId, driver: P) -> Result<(), P> {
        if self.channels.iter().any(|(id, _)| *id == pin) {
            return Err(driver);
        }
        self.channels.push((pin, driver)).map_err(|(_, driver)| driver)
    }

    pub fn driver(&self, pin: PinId) -> Option<&P> {
        self.channels
            .iter()
            .find(|(id, _)| *id == pin)
            .map(|(_, driver)| driver)
    }

    fn driver_mut(&mut self, pin: PinId) -> Option<&mut P> {
        let found = self
            .channels
            .iter_mut()
            .find(|(id, _)| *id == pin)
            .map(|(_, driver)| driver);
        if found.is_none() {
            warn!("hal: no driver attached for pin {}", pin);
        }
        found
    }
}

impl<P: OutputPin + SetDutyCycle> OutputPort for HalOutputs<P> {
    fn write_digital(&mut self, pin: PinId, level: Level) {
        let Some(driver) = self.driver_mut(pin) else {
            return;
        };
        let result = match level {
            Level::High => driver.set_high(),
            Level::Low => driver.set_low(),
        };
        if let Err(e) = result {
            warn!("hal: pin {} digital write {} failed: {:?}", pin, level, e);
        }
    }

    fn write_analog(&mut self, pin: PinId, duty: u8) {
        let Some(driver) = self.driver_mut(pin) else {
            return;
        };
        if let Err(e) = driver.set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX)) {
            warn!("hal: pin {} duty write {} failed: {:?}", pin, duty, e);
        }
    }
}
