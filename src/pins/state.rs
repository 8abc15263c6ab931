//! Per-pin state record.
//!
//! One [`PinState`] exists for every managed pin.  `mode` and
//! `timer_active` together decide which of the remaining fields mean
//! anything:
//!
//! | mode               | timer | meaningful fields                               |
//! |--------------------|-------|-------------------------------------------------|
//! | Digital / Pwm      | off   | `current_value`                                 |
//! | Digital / Pwm      | on    | + `start_time`, `duration`, `target_value`      |
//! | Fading(Holding)    | on    | + `start_time`, `duration` (hold), fade ends    |
//! | Fading(Active)     | on    | + `fade_start_time`, `duration` (fade), ends    |
//!
//! A pending `callback` only exists while the timer is on.

use core::fmt;
use core::ops::Not;

use serde::{Deserialize, Serialize};

use crate::app::ports::Millis;

use super::PinId;

/// Single-shot completion handler, invoked with the id of the pin whose
/// action finished.
///
/// Handlers run inside [`PinSet::update`](super::PinSet::update) while the
/// set is mutably borrowed, so they cannot call back into it.  To chain a
/// follow-up action, record the pin in shared state (e.g. an
/// `Rc<RefCell<Vec<PinId>>>`) and dispatch from the host loop after
/// `update()` returns.
pub type Completion = Box<dyn FnOnce(PinId)>;

/// Logical output level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Raw register value (0 or 1).
    pub fn as_u8(self) -> u8 {
        u8::from(self.is_high())
    }

    fn from_u8(raw: u8) -> Self {
        if raw == 0 { Self::Low } else { Self::High }
    }
}

impl Not for Level {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("LOW"),
            Self::High => f.write_str("HIGH"),
        }
    }
}

/// Sub-phase of a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    /// Plateau at the start duty before interpolation begins.
    Holding,
    /// Linear interpolation from start to finish duty.
    Active,
}

/// What a pin is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Digital,
    Pwm,
    Fading(FadePhase),
}

impl PinMode {
    pub fn is_digital(self) -> bool {
        matches!(self, Self::Digital)
    }
}

/// Bookkeeping for one managed pin.
pub struct PinState {
    pub(crate) id: PinId,
    pub(crate) mode: PinMode,
    /// Last finalized output: 0/1 for digital, duty for PWM/fading.
    pub(crate) current_value: u8,
    pub(crate) timer_active: bool,
    pub(crate) start_time: Millis,
    pub(crate) duration: Millis,
    /// Applied when a digital/PWM timer expires.
    pub(crate) target_value: u8,
    pub(crate) start_pwm_value: u8,
    pub(crate) finish_pwm_value: u8,
    pub(crate) fade_start_time: Millis,
    pub(crate) callback: Option<Completion>,
}

impl PinState {
    /// A fresh pin: digital, LOW, idle.
    pub(crate) fn new(id: PinId) -> Self {
        Self {
            id,
            mode: PinMode::Digital,
            current_value: Level::Low.as_u8(),
            timer_active: false,
            start_time: 0,
            duration: 0,
            target_value: 0,
            start_pwm_value: 0,
            finish_pwm_value: 0,
            fade_start_time: 0,
            callback: None,
        }
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn mode(&self) -> PinMode {
        self.mode
    }

    /// Last finalized output value.  Intermediate fade steps are not
    /// reflected here until the fade completes.
    pub fn current_value(&self) -> u8 {
        self.current_value
    }

    /// Current value read as a logic level (meaningful in digital mode).
    pub fn level(&self) -> Level {
        Level::from_u8(self.current_value)
    }

    pub fn has_pending(&self) -> bool {
        self.timer_active
    }

    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Drop any pending action and its callback without invoking it.
    pub(crate) fn cancel(&mut self) {
        self.timer_active = false;
        self.callback = None;
    }

    /// Arm a timer of `duration` ms starting at `now`.  Replaces (and
    /// drops) whatever callback was pending.
    pub(crate) fn arm(&mut self, now: Millis, duration: Millis, callback: Option<Completion>) {
        self.timer_active = true;
        self.start_time = now;
        self.duration = duration;
        self.callback = callback;
    }

    /// Take the callback, if any, and run it.  Leaves `None` behind so it
    /// can never run twice.
    pub(crate) fn fire_callback(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(self.id);
        }
    }
}

impl fmt::Debug for PinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinState")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("current_value", &self.current_value)
            .field("timer_active", &self.timer_active)
            .field("start_time", &self.start_time)
            .field("duration", &self.duration)
            .field("target_value", &self.target_value)
            .field("start_pwm_value", &self.start_pwm_value)
            .field("finish_pwm_value", &self.finish_pwm_value)
            .field("fade_start_time", &self.fade_start_time)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
