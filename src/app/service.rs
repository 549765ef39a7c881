//! Application service: the control loop.
//!
//! [`AppService`] owns the system state, the alert latch and the button
//! debouncer.  One [`tick`](AppService::tick) is one loop iteration; all I/O
//! flows through port traits injected at call sites, so the whole loop is
//! testable with mock adapters.
//!
//! ```text
//!   ButtonPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  RangingPort ──▶ │       AppService        │ ──▶ SpeechPort
//! ActuatorPort ◀── │ Debounce · State · Alert│ ◀─▶ FramePort
//!                  └────────────────────────┘
//! ```
//!
//! Single-threaded and cooperative: a quit request is only observed between
//! iterations, so an in-flight echo wait always completes or times out first.

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, warn};

use crate::alert::{AlertMachine, AlertState};
use crate::config::SystemConfig;
use crate::drivers::button::{ButtonEdge, ToggleDebouncer};
use crate::error::Result;
use crate::sensors::DistanceReading;
use crate::state::SystemState;

use super::events::{AppEvent, StopReason, TelemetryData};
use super::frame::{GREEN, RED, STATUS_ORIGIN};
use super::ports::{ActuatorPort, ButtonPort, EventSink, FramePort, RangingPort, SpeechPort, TimePort};

/// Spoken when an alert episode starts.
pub const OBSTACLE_ANNOUNCEMENT: &str = "object detected";

/// Overlay label while the system is inactive.
pub const INACTIVE_LABEL: &str = "System OFF";

/// Outcome of one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

pub struct AppService {
    config: SystemConfig,
    system: SystemState,
    alert: AlertMachine,
    debouncer: ToggleDebouncer,
    tick_count: u64,
    measurements: u64,
    faults: u64,
    alerts: u64,
    last_reading: Option<DistanceReading>,
}

impl AppService {
    /// Construct the service.  The system starts OFF.
    pub fn new(config: SystemConfig) -> Self {
        let alert = AlertMachine::new(config.alert_threshold_cm);
        let debouncer = ToggleDebouncer::new(u64::from(config.debounce_ms));

        Self {
            config,
            system: SystemState::Off,
            alert,
            debouncer,
            tick_count: 0,
            measurements: 0,
            faults: 0,
            alerts: 0,
            last_reading: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.system));
        info!("AppService started, system {}", self.system);
    }

    /// Run iterations until the quit key, the interrupt flag, or an
    /// unrecoverable error.  Does not clean up; call [`shutdown`] after.
    ///
    /// [`shutdown`]: AppService::shutdown
    pub fn run<H, F, S, E, C>(
        &mut self,
        hw: &mut H,
        frames: &mut F,
        speech: &mut S,
        sink: &mut E,
        clock: &C,
        interrupt: &AtomicBool,
    ) -> Result<StopReason>
    where
        H: ButtonPort + RangingPort + ActuatorPort,
        F: FramePort,
        S: SpeechPort,
        E: EventSink,
        C: TimePort,
    {
        loop {
            if interrupt.load(Ordering::Acquire) {
                return Ok(StopReason::Interrupted);
            }
            match self.tick(hw, frames, speech, sink, clock.uptime_ms())? {
                LoopControl::Continue => {}
                LoopControl::Quit => return Ok(StopReason::QuitKey),
            }
        }
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// One loop iteration: button → frame → (measure → alert → actuate) →
    /// overlay → display → quit check.
    ///
    /// The `hw` parameter satisfies the button, ranging **and** actuator
    /// ports, so the GPIO owner is borrowed mutably only once.
    pub fn tick<H, F, S, E>(
        &mut self,
        hw: &mut H,
        frames: &mut F,
        speech: &mut S,
        sink: &mut E,
        now_ms: u64,
    ) -> Result<LoopControl>
    where
        H: ButtonPort + RangingPort + ActuatorPort,
        F: FramePort,
        S: SpeechPort,
        E: EventSink,
    {
        self.tick_count += 1;

        // 1. Button
        let pressed = hw.is_pressed();
        if self.debouncer.poll(pressed, now_ms) == ButtonEdge::Pressed {
            self.system = self.system.toggled();
            info!("Button: system turned {}", self.system);
            sink.emit(&AppEvent::SystemToggled(self.system));
            speech.speak(self.system.announcement());
        }

        // 2. Frame (always, so live video continues while inactive)
        let mut frame = frames.capture_frame()?;

        // 3. Sense and act
        let prev_alert = self.alert.state();
        if self.system.is_on() {
            let reading = hw.measure();
            self.record_reading(reading);
            sink.emit(&AppEvent::DistanceMeasured(reading));

            let out = self.alert.evaluate(true, reading);
            hw.set_vibration(out.vibrate);
            if out.speak_now {
                self.alerts += 1;
                speech.speak(OBSTACLE_ANNOUNCEMENT);
                sink.emit(&AppEvent::ObstacleDetected(reading));
            }

            let label = format!("Distance: {reading} cm");
            frames.draw_text(&mut frame, &label, STATUS_ORIGIN, GREEN);
        } else {
            hw.set_vibration(false);
            self.alert.reset();
            frames.draw_text(&mut frame, INACTIVE_LABEL, STATUS_ORIGIN, RED);
        }
        if prev_alert == AlertState::Alerting && self.alert.state() == AlertState::Idle {
            sink.emit(&AppEvent::ObstacleCleared);
        }

        // 4. Display
        frames.display(&frame);

        // A zero interval disables periodic telemetry.
        if self.tick_count.checked_rem(u64::from(self.config.telemetry_interval_ticks)) == Some(0) {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }

        // 5. Quit key
        if frames.poll_quit_key() {
            info!("Quit key pressed");
            return Ok(LoopControl::Quit);
        }
        Ok(LoopControl::Continue)
    }

    /// Force every actuator safe, close the frame service and report.
    /// Safe to call on any exit path, including after an error.
    pub fn shutdown(
        &mut self,
        hw: &mut impl ActuatorPort,
        frames: &mut impl FramePort,
        sink: &mut impl EventSink,
        reason: StopReason,
    ) {
        hw.set_vibration(false);
        hw.all_off();
        if self.alert.state() == AlertState::Alerting {
            sink.emit(&AppEvent::ObstacleCleared);
        }
        self.alert.reset();
        frames.close();

        sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        sink.emit(&AppEvent::Stopped(reason));
        match reason {
            StopReason::Fault => warn!("AppService stopped on fault after {} iterations", self.tick_count),
            _ => info!("AppService stopped ({:?}) after {} iterations", reason, self.tick_count),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            system: self.system,
            alert: self.alert.state(),
            iterations: self.tick_count,
            measurements: self.measurements,
            faults: self.faults,
            alerts: self.alerts,
            last_reading: self.last_reading,
        }
    }

    pub fn system_state(&self) -> SystemState {
        self.system
    }

    pub fn alert_state(&self) -> AlertState {
        self.alert.state()
    }

    /// Total loop iterations executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn record_reading(&mut self, reading: DistanceReading) {
        self.measurements += 1;
        if reading.is_fault() {
            self.faults += 1;
        }
        debug!("Distance: {reading} cm");
        self.last_reading = Some(reading);
    }
}
