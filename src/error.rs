//! Unified error types for the pin set.
//!
//! The core never fails at runtime: unknown pins are ignored and duty values
//! are clamped.  The only fallible paths are construction (configuration
//! validation) and single-pin status queries.  All variants are `Copy` so
//! they can be passed around without allocation.

use core::fmt;

use crate::pins::PinId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The configuration was rejected during validation.
    Config(ConfigError),
    /// The requested pin id is not part of the managed set.
    PinNotManaged(PinId),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::PinNotManaged(pin) => write!(f, "pin {pin} not managed by this instance"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The same pin id appears more than once in the managed set.
    DuplicatePin(PinId),
    /// More pins were requested than the registry can hold.
    TooManyPins { count: usize, max: usize },
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicatePin(pin) => write!(f, "pin {pin} listed more than once"),
            Self::TooManyPins { count, max } => {
                write!(f, "{count} pins requested, at most {max} supported")
            }
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
