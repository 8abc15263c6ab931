//! Timed actions, fades, and overwrite semantics, driven poll by poll.

use pinset::{FadePhase, Level, PinMode};

use crate::mock_hw::{Fired, ManualClock, OutputCall, pin_set};

const LED: i32 = 2;
const LAMP: i32 = 6;

#[test]
fn digital_timed_pulse_reverts_once() {
    let clock = ManualClock::at(10_000);
    let mut set = pin_set(&[LED, LAMP], &clock);
    let fired = Fired::new();

    set.set_digital_timed(LED, Level::High, 2, fired.callback());
    assert_eq!(set.output().last_digital(LED), Some(Level::High));

    // Every poll before the deadline leaves the pin HIGH and the callback idle.
    for t in (10_000..12_000).step_by(250) {
        clock.set(t);
        set.update();
        assert_eq!(set.output().last_digital(LED), Some(Level::High));
        assert_eq!(fired.count(), 0);
    }

    clock.set(12_000);
    set.update();
    assert_eq!(set.output().last_digital(LED), Some(Level::Low));
    assert_eq!(fired.pins(), vec![LED]);

    for _ in 0..5 {
        clock.advance(1_000);
        set.update();
    }
    assert_eq!(fired.count(), 1);
    assert_eq!(
        set.output().calls_for(LED),
        vec![
            OutputCall::Digital(LED, Level::High),
            OutputCall::Digital(LED, Level::Low)
        ]
    );
}

#[test]
fn delays_and_holds_are_whole_seconds() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED, LAMP], &clock);
    let fired = Fired::new();

    set.set_digital_timed(LED, Level::High, 2, None);
    set.set_fade_with_hold(LAMP, 255, 0, 5, fired.callback());

    for t in [2, 5, 1_005, 1_999] {
        clock.set(t);
        set.update();
        assert_eq!(set.output().last_digital(LED), Some(Level::High));
    }
    clock.set(2_000);
    set.update();
    assert_eq!(set.output().last_digital(LED), Some(Level::Low));

    clock.set(4_999);
    set.update();
    assert_eq!(
        set.pin(LAMP).unwrap().mode(),
        PinMode::Fading(FadePhase::Holding)
    );
    assert_eq!(set.output().last_analog(LAMP), Some(255));

    clock.set(5_000);
    set.update();
    clock.set(5_999);
    set.update();
    assert_eq!(fired.count(), 0);
    clock.set(6_000);
    set.update();
    assert_eq!(fired.pins(), vec![LAMP]);
    assert_eq!(set.output().last_analog(LAMP), Some(0));
}

#[test]
fn huge_delay_saturates_instead_of_wrapping() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED], &clock);

    // 4_294_968 s * 1000 would wrap to a few hundred ms.
    set.set_digital_timed(LED, Level::High, 4_294_968, None);
    for _ in 0..1_000 {
        clock.advance(1_000_000);
        set.update();
    }
    assert!(set.has_pending(LED));
    assert_eq!(set.output().last_digital(LED), Some(Level::High));
}

#[test]
fn late_poll_fires_at_first_poll_after_deadline() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED], &clock);
    let fired = Fired::new();

    set.set_digital_timed(LED, Level::Low, 1, fired.callback());
    clock.set(5_000);
    set.update();
    assert_eq!(set.output().last_digital(LED), Some(Level::High));
    assert_eq!(fired.count(), 1);
}

#[test]
fn fade_rises_monotonically_and_lands_exactly() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LAMP], &clock);

    set.set_fade(LAMP, 0, 255);
    for t in (10..1_000).step_by(10) {
        clock.set(t);
        set.update();
    }
    let history = set.output().analog_history(LAMP);
    assert_eq!(history[0], 0);
    assert!(history.windows(2).all(|w| w[0] <= w[1]));
    for (i, duty) in history.iter().enumerate().skip(1) {
        let expected = (i as u32 * 10) * 255 / 1_000;
        assert_eq!(u32::from(*duty), expected);
    }
    assert!(*history.last().unwrap() < 255);

    clock.set(1_000);
    set.update();
    assert_eq!(set.output().last_analog(LAMP), Some(255));
    let p = set.pin(LAMP).unwrap();
    assert_eq!(p.mode(), PinMode::Pwm);
    assert!(!p.has_pending());

    // Nothing further is written once the fade has landed.
    let writes = set.output().calls.len();
    clock.set(3_000);
    set.update();
    assert_eq!(set.output().calls.len(), writes);
}

#[test]
fn hold_then_fade_fires_at_fade_end_not_hold_end() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LAMP], &clock);
    let fired = Fired::new();

    set.set_fade_with_hold(LAMP, 255, 0, 5, fired.callback());

    for t in (0..5_000).step_by(500) {
        clock.set(t);
        set.update();
        assert_eq!(set.output().last_analog(LAMP), Some(255));
        assert_eq!(
            set.pin(LAMP).unwrap().mode(),
            PinMode::Fading(FadePhase::Holding)
        );
    }
    assert_eq!(fired.count(), 0);

    clock.set(5_000);
    set.update();
    assert_eq!(set.pin(LAMP).unwrap().mode(), PinMode::Fading(FadePhase::Active));
    assert_eq!(fired.count(), 0);

    clock.set(5_500);
    set.update();
    assert_eq!(set.output().last_analog(LAMP), Some(127));
    assert_eq!(fired.count(), 0);

    clock.set(6_000);
    set.update();
    assert_eq!(set.output().last_analog(LAMP), Some(0));
    assert_eq!(fired.pins(), vec![LAMP]);

    clock.set(9_000);
    set.update();
    assert_eq!(fired.count(), 1);
}

#[test]
fn flat_fade_holds_value_then_completes() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LAMP], &clock);

    set.set_fade(LAMP, 77, 77);
    clock.set(600);
    set.update();
    assert_eq!(set.output().last_analog(LAMP), Some(77));
    assert!(set.has_pending(LAMP));
    clock.set(1_000);
    set.update();
    assert!(!set.has_pending(LAMP));
    assert_eq!(set.pin(LAMP).unwrap().current_value(), 77);
}

#[test]
fn pwm_timed_revert_rule() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED, LAMP], &clock);

    set.set_pwm_timed(LED, 0, 1, None);
    set.set_pwm_timed(LAMP, 120, 1, None);
    clock.set(1_000);
    set.update();

    assert_eq!(set.output().last_analog(LED), Some(255));
    assert_eq!(set.output().last_analog(LAMP), Some(0));
    assert_eq!(set.pin(LED).unwrap().current_value(), 255);
    assert_eq!(set.pin(LAMP).unwrap().current_value(), 0);
}

#[test]
fn overwrite_discards_pending_callback() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED], &clock);
    let cb_a = Fired::new();

    set.set_digital_timed(LED, Level::High, 1, cb_a.callback());
    clock.set(500);
    set.set_pwm(LED, 10);

    for t in [999, 1_000, 1_500, 60_000] {
        clock.set(t);
        set.update();
    }
    assert_eq!(cb_a.count(), 0);
    assert_eq!(set.output().last_analog(LED), Some(10));
}

#[test]
fn new_timed_action_replaces_old_one() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED], &clock);
    let first = Fired::new();
    let second = Fired::new();

    set.set_digital_timed(LED, Level::High, 1, first.callback());
    clock.set(800);
    set.set_fade_with_hold(LED, 10, 20, 1, second.callback());

    clock.set(1_000);
    set.update();
    assert_eq!(first.count(), 0);
    assert!(set.has_pending(LED));

    clock.set(1_800);
    set.update();
    clock.set(2_800);
    set.update();
    assert_eq!(first.count(), 0);
    assert_eq!(second.pins(), vec![LED]);
}

#[test]
fn fade_without_hold_drops_prior_callback() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED], &clock);
    let fired = Fired::new();

    set.set_pwm_timed(LED, 50, 1, fired.callback());
    set.set_fade(LED, 0, 255);
    clock.set(2_000);
    set.update();
    assert_eq!(fired.count(), 0);
}

#[test]
fn deadlines_survive_clock_wrap() {
    let clock = ManualClock::at(u32::MAX - 500);
    let mut set = pin_set(&[LED, LAMP], &clock);
    let fired = Fired::new();

    set.set_digital_timed(LED, Level::High, 1, fired.callback());
    set.set_fade(LAMP, 0, 200);

    clock.advance(600); // wrapped: now == 99
    set.update();
    assert_eq!(fired.count(), 0);
    assert_eq!(set.output().last_analog(LAMP), Some(120));

    clock.advance(400);
    set.update();
    assert_eq!(fired.pins(), vec![LED]);
    assert_eq!(set.output().last_analog(LAMP), Some(200));
}

#[test]
fn overlapping_actions_on_many_pins() {
    let clock = ManualClock::at(0);
    let pins = [1, 2, 3, 4];
    let mut set = pin_set(&pins, &clock);
    let fired = Fired::new();

    set.set_digital_timed(1, Level::High, 3, fired.callback());
    set.set_pwm_timed(2, 60, 1, fired.callback());
    set.set_fade_with_hold(3, 0, 100, 1, fired.callback());
    set.set_pwm(4, 33);

    for t in (0..=3_500).step_by(50) {
        clock.set(t);
        set.update();
    }
    assert_eq!(fired.pins(), vec![2, 3, 1]);
    assert_eq!(set.pending_count(), 0);
    assert_eq!(set.output().last_analog(4), Some(33));
    assert_eq!(set.output().calls_for(4).len(), 1);
}

#[test]
fn completion_chains_follow_up_through_host_loop() {
    let clock = ManualClock::at(0);
    let mut set = pin_set(&[LED], &clock);
    let done = Fired::new();
    let chained = Fired::new();

    set.set_pwm_timed(LED, 200, 1, done.callback());

    let mut handled = 0;
    for t in (0..=3_000).step_by(100) {
        clock.set(t);
        set.update();
        // Follow-ups are dispatched once update() has released the set.
        for pin in done.pins().into_iter().skip(handled) {
            handled += 1;
            set.set_digital_timed(pin, Level::High, 1, chained.callback());
        }
    }

    assert_eq!(done.pins(), vec![LED]);
    assert_eq!(chained.pins(), vec![LED]);
    assert_eq!(
        set.output().calls_for(LED),
        vec![
            OutputCall::Analog(LED, 200),
            OutputCall::Analog(LED, 0),
            OutputCall::Configure(LED),
            OutputCall::Digital(LED, Level::High),
            OutputCall::Digital(LED, Level::Low),
        ]
    );
}
