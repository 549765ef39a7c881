//! Integration tests for the real `UltrasonicRanger` and `HardwareAdapter`
//! driven by the simulated HC-SR04 in virtual time.

use std::rc::Rc;

use smart_glasses::adapters::hardware::HardwareAdapter;
use smart_glasses::app::ports::{ActuatorPort, ButtonPort, RangingPort};
use smart_glasses::app::service::{AppService, OBSTACLE_ANNOUNCEMENT};
use smart_glasses::config::SystemConfig;
use smart_glasses::drivers::vibration::VibrationMotor;
use smart_glasses::sensors::{DistanceReading, UltrasonicRanger};

use crate::mock_hw::{
    BrokenPin, ButtonPin, EchoScript, LevelPin, MockFrames, RecordingSink, RecordingSpeech, SimClock,
    SimDelay, SimEchoPin, SimTrigPin,
};

const ECHO_LATENCY_US: u64 = 200;

fn ranger(
    clock: &SimClock,
    script: &Rc<EchoScript>,
) -> UltrasonicRanger<SimTrigPin, SimEchoPin, SimDelay, SimClock> {
    UltrasonicRanger::new(
        SimTrigPin::new(Rc::clone(script), clock.clone()),
        SimEchoPin::new(Rc::clone(script), clock.clone()),
        SimDelay::new(clock.clone()),
        clock.clone(),
        &SystemConfig::default(),
    )
}

fn assert_near(reading: DistanceReading, expected_cm: f64) {
    let DistanceReading::Measured(cm) = reading else {
        panic!("expected a measurement, got {reading:?}");
    };
    assert!((cm - expected_cm).abs() < 0.1, "measured {cm} cm, expected about {expected_cm} cm");
}

// ── Ranging ───────────────────────────────────────────────────

#[test]
fn measures_target_distance() {
    let clock = SimClock::new(1);
    let script = EchoScript::new(ECHO_LATENCY_US);
    let mut ranger = ranger(&clock, &script);

    script.set_distance_cm(20.0);
    assert_near(ranger.measure(), 20.0);

    script.set_distance_cm(60.0);
    assert_near(ranger.measure(), 60.0);

    assert_eq!(script.triggers.get(), 2, "one trigger pulse per measurement");
}

#[test]
fn each_measurement_waits_for_settle() {
    let clock = SimClock::new(1);
    let script = EchoScript::new(ECHO_LATENCY_US);
    let mut ranger = ranger(&clock, &script);
    script.set_distance_cm(20.0);

    let before = clock.peek();
    ranger.measure();
    let elapsed = clock.peek() - before;

    let settle_us = u64::from(SystemConfig::default().trigger_settle_ms) * 1_000;
    assert!(elapsed >= settle_us, "elapsed {elapsed} us");
    assert!(elapsed < settle_us + 5_000, "elapsed {elapsed} us");
}

#[test]
fn missing_echo_is_fault_after_timeout() {
    let clock = SimClock::new(10);
    let script = EchoScript::new(ECHO_LATENCY_US);
    script.set_echo_us(None);
    let mut ranger = ranger(&clock, &script);

    let before = clock.peek();
    assert_eq!(ranger.measure(), DistanceReading::Fault);
    let elapsed = clock.peek() - before;

    // settle (50 ms) + one 1 s timeout, not unbounded
    assert!(elapsed >= 1_000_000, "gave up too early: {elapsed} us");
    assert!(elapsed < 1_100_000, "waited too long: {elapsed} us");
}

#[test]
fn echo_stuck_high_is_fault() {
    let clock = SimClock::new(10);
    let script = EchoScript::new(ECHO_LATENCY_US);
    script.set_echo_us(Some(5_000_000));
    let mut ranger = ranger(&clock, &script);

    assert_eq!(ranger.measure(), DistanceReading::Fault);
}

#[test]
fn echo_read_error_is_fault() {
    let clock = SimClock::new(1);
    let mut ranger = UltrasonicRanger::new(
        LevelPin::default(),
        BrokenPin,
        SimDelay::new(clock.clone()),
        clock.clone(),
        &SystemConfig::default(),
    );

    assert_eq!(ranger.measure(), DistanceReading::Fault);
    assert!(!ranger.measure().is_within(40.0));
}

// ── Hardware adapter ──────────────────────────────────────────

#[test]
fn adapter_reads_active_low_button() {
    let clock = SimClock::new(1);
    let script = EchoScript::new(ECHO_LATENCY_US);
    let button = ButtonPin::default();
    let mut hw = HardwareAdapter::new(
        ranger(&clock, &script),
        VibrationMotor::new(LevelPin::default()),
        button.clone(),
    );

    assert!(!hw.is_pressed());
    button.0.set(true);
    assert!(hw.is_pressed());
}

#[test]
fn adapter_treats_button_error_as_released() {
    let clock = SimClock::new(1);
    let script = EchoScript::new(ECHO_LATENCY_US);
    let mut hw = HardwareAdapter::new(ranger(&clock, &script), VibrationMotor::new(LevelPin::default()), BrokenPin);

    assert!(!hw.is_pressed());
}

#[test]
fn release_all_drives_motor_low() {
    let clock = SimClock::new(1);
    let script = EchoScript::new(ECHO_LATENCY_US);
    let vib = LevelPin::default();
    let mut hw = HardwareAdapter::new(
        ranger(&clock, &script),
        VibrationMotor::new(vib.clone()),
        ButtonPin::default(),
    );

    hw.set_vibration(true);
    assert!(vib.0.get());
    assert!(hw.is_vibrating());

    hw.release_all();
    assert!(!vib.0.get());
}

#[test]
fn full_stack_alerts_on_close_obstacle() {
    let clock = SimClock::new(1);
    let script = EchoScript::new(ECHO_LATENCY_US);
    let vib = LevelPin::default();
    let button = ButtonPin::default();
    let mut hw = HardwareAdapter::new(
        ranger(&clock, &script),
        VibrationMotor::new(vib.clone()),
        button.clone(),
    );
    let mut frames = MockFrames::new();
    let mut speech = RecordingSpeech::default();
    let mut sink = RecordingSink::default();
    let mut app = AppService::new(SystemConfig::default());
    app.start(&mut sink);

    script.set_distance_cm(20.0);
    button.0.set(true);
    app.tick(&mut hw, &mut frames, &mut speech, &mut sink, 0).expect("tick");
    button.0.set(false);

    assert!(vib.0.get(), "motor on for a 20 cm obstacle");
    assert_eq!(speech.said, vec!["system ON", OBSTACLE_ANNOUNCEMENT]);
    assert_eq!(frames.last_caption(), "Distance: 20.00 cm");

    script.set_distance_cm(60.0);
    app.tick(&mut hw, &mut frames, &mut speech, &mut sink, 100).expect("tick");
    assert!(!vib.0.get(), "motor off once the path is clear");
    assert_near(hw.measure(), 60.0);
}
