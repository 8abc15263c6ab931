//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific part of the
//! pin set against mock adapters.  All tests run on the host with no real
//! hardware required.

mod timed_action_tests;
