//! Application boundary.
//!
//! The pin state machine never touches hardware or reads a clock directly.
//! Everything it needs from the outside world flows through the **port
//! traits** defined in [`ports`], keeping the core fully testable without
//! real peripherals.

pub mod ports;
