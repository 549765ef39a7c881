//! Mock hardware for integration tests.
//!
//! Two layers of mocks:
//!
//! - **Port level** (`MockHardware`, `MockFrames`, `RecordingSpeech`,
//!   `RecordingSink`) record every call the control loop makes.
//! - **Pin level** (`SimClock`, `SimDelay`, `SimTrigPin`, `SimEchoPin`, ...)
//!   simulate an HC-SR04 in virtual time so the real ranger and
//!   `HardwareAdapter` can be driven without GPIO.

#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use smart_glasses::app::events::AppEvent;
use smart_glasses::app::frame::{Colour, Frame, Point, TextOverlay};
use smart_glasses::app::ports::{
    ActuatorPort, ButtonPort, EventSink, FramePort, RangingPort, SpeechPort, TimePort,
};
use smart_glasses::error::FrameError;
use smart_glasses::sensors::DistanceReading;

// ── Port-level: hardware ──────────────────────────────────────

pub struct MockHardware {
    /// Raw button level per tick; empty = released.
    pub presses: VecDeque<bool>,
    /// Readings returned by successive `measure()` calls; empty = FAULT.
    pub readings: VecDeque<DistanceReading>,
    pub measure_calls: usize,
    pub vibration: bool,
    /// Every `set_vibration` value in order.
    pub vibration_log: Vec<bool>,
    pub all_off_calls: usize,
}

impl MockHardware {
    pub fn new() -> Self {
        Self {
            presses: VecDeque::new(),
            readings: VecDeque::new(),
            measure_calls: 0,
            vibration: false,
            vibration_log: Vec::new(),
            all_off_calls: 0,
        }
    }

    pub fn press_next(&mut self) {
        self.presses.push_back(true);
    }

    pub fn queue_cm(&mut self, cm: f64) {
        self.readings.push_back(DistanceReading::Measured(cm));
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonPort for MockHardware {
    fn is_pressed(&mut self) -> bool {
        self.presses.pop_front().unwrap_or(false)
    }
}

impl RangingPort for MockHardware {
    fn measure(&mut self) -> DistanceReading {
        self.measure_calls += 1;
        self.readings.pop_front().unwrap_or(DistanceReading::Fault)
    }
}

impl ActuatorPort for MockHardware {
    fn set_vibration(&mut self, on: bool) {
        self.vibration = on;
        self.vibration_log.push(on);
    }

    fn is_vibrating(&self) -> bool {
        self.vibration
    }

    fn all_off(&mut self) {
        self.vibration = false;
        self.all_off_calls += 1;
    }
}

// ── Port-level: frames ────────────────────────────────────────

pub struct MockFrames {
    pub captured: u64,
    pub displayed: Vec<Frame>,
    /// Report the quit key after this many displayed frames.
    pub quit_after: Option<usize>,
    /// Fail capture number N (1-based).
    pub fail_capture_at: Option<u64>,
    pub close_calls: usize,
}

impl MockFrames {
    pub fn new() -> Self {
        Self {
            captured: 0,
            displayed: Vec::new(),
            quit_after: None,
            fail_capture_at: None,
            close_calls: 0,
        }
    }

    pub fn last_caption(&self) -> String {
        self.displayed.last().map(Frame::caption).unwrap_or_default()
    }

    pub fn last_overlay(&self) -> Option<&TextOverlay> {
        self.displayed.last().and_then(|f| f.overlays.last())
    }
}

impl Default for MockFrames {
    fn default() -> Self {
        Self::new()
    }
}

impl FramePort for MockFrames {
    fn capture_frame(&mut self) -> Result<Frame, FrameError> {
        self.captured += 1;
        if self.fail_capture_at == Some(self.captured) {
            return Err(FrameError::CaptureFailed);
        }
        Ok(Frame::new(self.captured, 640, 480))
    }

    fn draw_text(&mut self, frame: &mut Frame, text: &str, origin: Point, colour: Colour) {
        frame.overlays.push(TextOverlay {
            text: text.to_owned(),
            origin,
            colour,
        });
    }

    fn display(&mut self, frame: &Frame) {
        self.displayed.push(frame.clone());
    }

    fn poll_quit_key(&mut self) -> bool {
        self.quit_after.is_some_and(|n| self.displayed.len() >= n)
    }

    fn close(&mut self) {
        self.close_calls += 1;
    }
}

// ── Port-level: speech + events ───────────────────────────────

#[derive(Default)]
pub struct RecordingSpeech {
    pub said: Vec<String>,
}

impl SpeechPort for RecordingSpeech {
    fn speak(&mut self, text: &str) {
        self.said.push(text.to_owned());
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Pin-level: virtual time ───────────────────────────────────

/// Virtual microsecond clock.  Every `uptime_us()` query advances time by
/// `step_us`, modelling the cost of one polling iteration.
#[derive(Clone)]
pub struct SimClock {
    now: Rc<Cell<u64>>,
    step_us: u64,
}

impl SimClock {
    pub fn new(step_us: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step_us,
        }
    }

    /// Current time without advancing.
    pub fn peek(&self) -> u64 {
        self.now.get()
    }

    pub fn advance_us(&self, us: u64) {
        self.now.set(self.now.get() + us);
    }

    pub fn set_ms(&self, ms: u64) {
        self.now.set(ms * 1000);
    }
}

impl TimePort for SimClock {
    fn uptime_us(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t + self.step_us);
        t
    }
}

pub struct SimDelay {
    clock: SimClock,
}

impl SimDelay {
    pub fn new(clock: SimClock) -> Self {
        Self { clock }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_us(u64::from(ns).div_ceil(1000));
    }
}

// ── Pin-level: HC-SR04 simulation ─────────────────────────────

/// Shared between the TRIG and ECHO mocks.
pub struct EchoScript {
    /// When the last trigger pulse ended.
    fired_at: Cell<Option<u64>>,
    /// Echo pulse width for the next measurements; `None` = no echo.
    echo_us: Cell<Option<u64>>,
    /// Delay between trigger and echo rising edge.
    latency_us: u64,
    pub triggers: Cell<u32>,
}

impl EchoScript {
    pub fn new(latency_us: u64) -> Rc<Self> {
        Rc::new(Self {
            fired_at: Cell::new(None),
            echo_us: Cell::new(None),
            latency_us,
            triggers: Cell::new(0),
        })
    }

    /// Echo width that a target at `cm` produces at 343 m/s.
    pub fn set_distance_cm(&self, cm: f64) {
        let us = (cm * 2.0 / 34_300.0 * 1_000_000.0).round() as u64;
        self.echo_us.set(Some(us));
    }

    pub fn set_echo_us(&self, us: Option<u64>) {
        self.echo_us.set(us);
    }
}

pub struct SimTrigPin {
    script: Rc<EchoScript>,
    clock: SimClock,
    high: bool,
}

impl SimTrigPin {
    pub fn new(script: Rc<EchoScript>, clock: SimClock) -> Self {
        Self {
            script,
            clock,
            high: false,
        }
    }
}

impl ErrorType for SimTrigPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for SimTrigPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.high {
            self.script.fired_at.set(Some(self.clock.peek()));
            self.script.triggers.set(self.script.triggers.get() + 1);
        }
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        Ok(())
    }
}

pub struct SimEchoPin {
    script: Rc<EchoScript>,
    clock: SimClock,
}

impl SimEchoPin {
    pub fn new(script: Rc<EchoScript>, clock: SimClock) -> Self {
        Self { script, clock }
    }
}

impl ErrorType for SimEchoPin {
    type Error = core::convert::Infallible;
}

impl InputPin for SimEchoPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let (Some(fired), Some(width)) = (self.script.fired_at.get(), self.script.echo_us.get())
        else {
            return Ok(false);
        };
        let rise = fired + self.script.latency_us;
        let now = self.clock.peek();
        Ok(now >= rise && now < rise + width)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|h| !h)
    }
}

/// Input pin that always errors.
pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = ErrorKind;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, ErrorKind> {
        Err(ErrorKind::Other)
    }

    fn is_low(&mut self) -> Result<bool, ErrorKind> {
        Err(ErrorKind::Other)
    }
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), ErrorKind> {
        Err(ErrorKind::Other)
    }

    fn set_high(&mut self) -> Result<(), ErrorKind> {
        Err(ErrorKind::Other)
    }
}

/// Output pin whose level is visible to the test.
#[derive(Clone, Default)]
pub struct LevelPin(pub Rc<Cell<bool>>);

impl ErrorType for LevelPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for LevelPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set(true);
        Ok(())
    }
}

/// Active-low button: `pressed = true` reads LOW.
#[derive(Clone, Default)]
pub struct ButtonPin(pub Rc<Cell<bool>>);

impl ErrorType for ButtonPin {
    type Error = core::convert::Infallible;
}

impl InputPin for ButtonPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.0.get())
    }
}
