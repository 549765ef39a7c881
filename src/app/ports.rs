//! Port traits: the hexagonal boundary between the control loop and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (rangefinder, button, motor, frame service, speech,
//! event sinks, clock) implement these traits.  The
//! [`AppService`](super::service::AppService) consumes them via generics, so
//! the loop never touches hardware directly.
//!
//! Raw pin access lives one level lower, behind the `embedded-hal` 1.0
//! digital and delay traits.

use crate::error::FrameError;
use crate::sensors::DistanceReading;

use super::frame::{Colour, Frame, Point};

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// One ultrasonic measurement per call.
pub trait RangingPort {
    /// Measure the distance to the nearest obstacle.  Failures are reported
    /// as [`DistanceReading::Fault`], never as an error.
    fn measure(&mut self) -> DistanceReading;
}

/// Raw level of the toggle button.
pub trait ButtonPort {
    /// `true` while the button is held down (pin reads LOW).
    fn is_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

pub trait ActuatorPort {
    /// Energise or de-energise the vibration motor.
    fn set_vibration(&mut self, on: bool);

    fn is_vibrating(&self) -> bool;

    /// Put every actuator into its safe state.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Frame / overlay service
// ───────────────────────────────────────────────────────────────

/// Camera capture plus on-screen text rendering.
pub trait FramePort {
    fn capture_frame(&mut self) -> Result<Frame, FrameError>;

    fn draw_text(&mut self, frame: &mut Frame, text: &str, origin: Point, colour: Colour);

    /// Show or emit the finished frame.
    fn display(&mut self, frame: &Frame);

    /// `true` once the user has asked to quit.
    fn poll_quit_key(&mut self) -> bool;

    /// Release the camera / window.  Idempotent.
    fn close(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Speech
// ───────────────────────────────────────────────────────────────

/// Fire-and-forget text-to-speech.  Implementations must not block the
/// caller on synthesis and must swallow (log) their own failures.
pub trait SpeechPort {
    fn speak(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic clock.
pub trait TimePort {
    /// Microseconds since an arbitrary fixed origin.
    fn uptime_us(&self) -> u64;

    fn uptime_ms(&self) -> u64 {
        self.uptime_us() / 1000
    }
}

impl<T: TimePort + ?Sized> TimePort for &T {
    fn uptime_us(&self) -> u64 {
        (**self).uptime_us()
    }
}
