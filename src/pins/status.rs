//! Status reporting: read-only {mode, value} projections.
//!
//! Digital pins report their logic level (`"HIGH"` / `"LOW"`); PWM and
//! fading pins report their last finalized duty as a decimal string.
//!
//! ```text
//!   pin_status(2)   → {"mode":"digital","value":"HIGH"}
//!   pin_status(6)   → {"mode":"pwm","value":"88"}
//!   pin_status(99)  → {"error":"Pin not managed by this instance"}
//!   system_status() → {"2":"HIGH","6":"88"}
//! ```

use core::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::app::ports::{Clock, OutputPort};
use crate::config::MAX_PINS;
use crate::error::Error;

use super::state::{Level, PinMode, PinState};
use super::{PinId, PinSet};

const NOT_MANAGED_MSG: &str = "Pin not managed by this instance";

/// Mode tag as reported externally.  Fade sub-phases are not exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeTag {
    Digital,
    Pwm,
    Fading,
}

impl From<PinMode> for ModeTag {
    fn from(mode: PinMode) -> Self {
        match mode {
            PinMode::Digital => Self::Digital,
            PinMode::Pwm => Self::Pwm,
            PinMode::Fading(_) => Self::Fading,
        }
    }
}

/// Rendered pin value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinValue {
    Level(Level),
    Duty(u8),
}

impl PinValue {
    fn of(state: &PinState) -> Self {
        if state.mode().is_digital() {
            Self::Level(state.level())
        } else {
            Self::Duty(state.current_value())
        }
    }
}

impl fmt::Display for PinValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{level}"),
            Self::Duty(duty) => write!(f, "{duty}"),
        }
    }
}

impl Serialize for PinValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Status of a single managed pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PinStatus {
    pub mode: ModeTag,
    pub value: PinValue,
}

impl From<&PinState> for PinStatus {
    fn from(state: &PinState) -> Self {
        Self {
            mode: state.mode().into(),
            value: PinValue::of(state),
        }
    }
}

/// Value of every managed pin, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemStatus {
    entries: heapless::Vec<(PinId, PinValue), MAX_PINS>,
}

impl SystemStatus {
    pub fn get(&self, pin: PinId) -> Option<PinValue> {
        self.entries
            .iter()
            .find(|(id, _)| *id == pin)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, pin: PinId) -> bool {
        self.get(pin).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PinId, PinValue)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SystemStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (pin, value) in &self.entries {
            map.serialize_entry(pin, value)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct NotManaged {
    error: &'static str,
}

impl<O: OutputPort, C: Clock> PinSet<O, C> {
    /// {mode, value} of one pin, or [`Error::PinNotManaged`].
    pub fn pin_status(&self, pin: PinId) -> Result<PinStatus, Error> {
        self.pin(pin)
            .map(PinStatus::from)
            .ok_or(Error::PinNotManaged(pin))
    }

    /// Value of every managed pin.
    pub fn system_status(&self) -> SystemStatus {
        let mut entries = heapless::Vec::new();
        for state in &self.pins {
            // Same capacity as the registry.
            let _ = entries.push((state.id(), PinValue::of(state)));
        }
        SystemStatus { entries }
    }

    /// [`pin_status`](Self::pin_status) rendered as a JSON object.
    pub fn pin_status_json(&self, pin: PinId) -> String {
        let rendered = match self.pin_status(pin) {
            Ok(status) => serde_json::to_string(&status),
            Err(_) => serde_json::to_string(&NotManaged {
                error: NOT_MANAGED_MSG,
            }),
        };
        rendered.unwrap_or_default()
    }

    /// [`system_status`](Self::system_status) rendered as a JSON object
    /// keyed by pin id.
    pub fn status_json(&self) -> String {
        serde_json::to_string(&self.system_status()).unwrap_or_default()
    }
}
