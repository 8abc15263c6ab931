//! PinSet library.
//!
//! Drives a fixed set of output pins through digital, PWM, timed, and
//! fading actions from a cooperative polling loop.  The state machine in
//! [`pins`] talks to hardware and time only through the port traits in
//! [`app::ports`]; [`adapters`] supplies `embedded-hal`, logging, and host
//! clock implementations.
//!
//! ```text
//! let mut set = PinSet::new(&config, outputs, clock)?;
//! set.set_fade_with_hold(6, 255, 0, 5, Some(Box::new(|pin| ...)));
//! loop {
//!     set.update();
//! }
//! ```

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod pins;

pub use app::ports::{Clock, Millis, OutputPort};
pub use config::PinSetConfig;
pub use error::{ConfigError, Error};
pub use pins::state::{Completion, FadePhase, Level, PinMode};
pub use pins::status::{ModeTag, PinStatus, PinValue, SystemStatus};
pub use pins::{PinId, PinSet};
