//! Pin set configuration.
//!
//! The managed set is fixed at construction: an ordered list of pin ids
//! plus the length of the active fade window.  Values can be built in code
//! or deserialized from JSON (e.g. a provisioning blob).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pins::PinId;

/// Maximum number of pins a single [`PinSet`](crate::pins::PinSet) manages.
/// Enough for every GPIO on the largest ESP32 parts.
pub const MAX_PINS: usize = 48;

/// Default length of the active fade phase (milliseconds).
pub const DEFAULT_FADE_DURATION_MS: u32 = 1000;

/// Configuration for a [`PinSet`](crate::pins::PinSet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSetConfig {
    /// Managed pin ids, in reporting order.
    pub pins: heapless::Vec<PinId, MAX_PINS>,
    /// Length of the interpolated fade (milliseconds).
    #[serde(default = "default_fade_duration_ms")]
    pub fade_duration_ms: u32,
}

fn default_fade_duration_ms() -> u32 {
    DEFAULT_FADE_DURATION_MS
}

impl PinSetConfig {
    /// Build a configuration for `pins` with default timing.
    pub fn new(pins: &[PinId]) -> Result<Self, ConfigError> {
        let pins = heapless::Vec::from_slice(pins).map_err(|_| ConfigError::TooManyPins {
            count: pins.len(),
            max: MAX_PINS,
        })?;
        Ok(Self {
            pins,
            fade_duration_ms: DEFAULT_FADE_DURATION_MS,
        })
    }

    /// Override the fade length.
    pub fn with_fade_duration_ms(mut self, fade_duration_ms: u32) -> Self {
        self.fade_duration_ms = fade_duration_ms;
        self
    }

    /// Reject configurations the core cannot run safely.
    ///
    /// Duplicate pin ids are disallowed: two records driving the same
    /// physical pin would fight over its output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_duration_ms == 0 {
            return Err(ConfigError::ValidationFailed("fade_duration_ms must be > 0"));
        }
        for (i, pin) in self.pins.iter().enumerate() {
            if self.pins[..i].contains(pin) {
                return Err(ConfigError::DuplicatePin(*pin));
            }
        }
        Ok(())
    }
}
