//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter      | Implements  | Connects to                          |
//! |--------------|-------------|--------------------------------------|
//! | `hal`        | OutputPort  | `embedded-hal` GPIO + PWM drivers    |
//! | `log_output` | OutputPort  | Logger (simulation / dry run)        |
//! | `time`       | Clock       | `std::time::Instant`, wrapping u32   |

pub mod hal;
pub mod log_output;
pub mod time;
