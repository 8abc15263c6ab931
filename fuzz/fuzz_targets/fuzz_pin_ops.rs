//! Fuzz target: arbitrary command sequences against `PinSet`
//!
//! Decodes the input as a stream of 8-byte commands: op, pin, two duties,
//! and a 32-bit argument read as a clock jump (ms) or a delay (seconds).
//! Asserts that the pin set never panics, never writes a pin outside its
//! set, and never runs a completion callback twice.
//!
//! cargo fuzz run fuzz_pin_ops

#![no_main]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use libfuzzer_sys::fuzz_target;
use pinset::{Clock, Completion, Level, Millis, OutputPort, PinId, PinSet, PinSetConfig};

const PINS: [PinId; 4] = [2, 4, 6, 8];

struct Guarded;

impl OutputPort for Guarded {
    fn write_digital(&mut self, pin: PinId, _level: Level) {
        assert!(PINS.contains(&pin), "write to unmanaged pin {pin}");
    }

    fn write_analog(&mut self, pin: PinId, _duty: u8) {
        assert!(PINS.contains(&pin), "write to unmanaged pin {pin}");
    }
}

#[derive(Clone, Default)]
struct FuzzClock(Rc<Cell<Millis>>);

impl Clock for FuzzClock {
    fn now_ms(&self) -> Millis {
        self.0.get()
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(config) = PinSetConfig::new(&PINS) else {
        return;
    };
    let clock = FuzzClock::default();
    let Ok(mut set) = PinSet::new(&config, Guarded, clock.clone()) else {
        return;
    };

    let fired: Rc<RefCell<Vec<u32>>> = Rc::default();
    let mut next_id = 0u32;
    let mut callback = || -> Option<Completion> {
        let id = next_id;
        next_id += 1;
        let fired = fired.clone();
        Some(Box::new(move |_: PinId| fired.borrow_mut().push(id)))
    };

    for cmd in data.chunks_exact(8) {
        // Index 4 maps outside the set on purpose.
        let pin = PINS.get(usize::from(cmd[1] % 5)).copied().unwrap_or(99);
        let a = i32::from(cmd[2] as i8) * 3;
        let b = i32::from(cmd[3] as i8) * 3;
        let arg = u32::from_le_bytes([cmd[4], cmd[5], cmd[6], cmd[7]]);
        let jump_ms = arg % 10_000;
        let secs = arg % 20;

        match cmd[0] % 8 {
            0 => set.set_digital(pin, Level::from(a > 0)),
            1 => set.set_digital_timed(pin, Level::from(a > 0), secs, callback()),
            2 => set.set_pwm(pin, a),
            3 => set.set_pwm_timed(pin, a, secs, callback()),
            4 => set.set_fade(pin, a, b),
            5 => set.set_fade_with_hold(pin, a, b, secs, callback()),
            6 => {
                clock.0.set(clock.0.get().wrapping_add(jump_ms));
                set.update();
            }
            _ => {
                let _ = set.status_json();
                let _ = set.pin_status_json(pin);
            }
        }
    }

    let mut ids = fired.borrow().clone();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total, "completion ran more than once");
});
