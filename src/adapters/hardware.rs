//! Hardware adapter: bridges GPIO peripherals to domain port traits.
//!
//! Owns the rangefinder, the vibration motor and the button input, exposing
//! them through [`RangingPort`], [`ButtonPort`] and [`ActuatorPort`].  This is
//! the only module that touches pins.  It is generic over `embedded-hal`
//! types: rppal pins on the Pi, recording mocks in the integration tests.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{info, warn};

use crate::app::ports::{ActuatorPort, ButtonPort, RangingPort, TimePort};
use crate::drivers::vibration::VibrationMotor;
use crate::error::SensorError;
use crate::sensors::{DistanceReading, UltrasonicRanger};

/// Concrete adapter that combines all GPIO behind port traits.
pub struct HardwareAdapter<Trig, Echo, Vib: OutputPin, Btn, D, C> {
    ranger: UltrasonicRanger<Trig, Echo, D, C>,
    motor: VibrationMotor<Vib>,
    button: Btn,
}

impl<Trig, Echo, Vib, Btn, D, C> HardwareAdapter<Trig, Echo, Vib, Btn, D, C>
where
    Vib: OutputPin,
{
    pub fn new(ranger: UltrasonicRanger<Trig, Echo, D, C>, motor: VibrationMotor<Vib>, button: Btn) -> Self {
        Self {
            ranger,
            motor,
            button,
        }
    }

    /// Drive every output safe and give all pins back to the system.
    /// Consumes the adapter, so it can only happen once.
    pub fn release_all(mut self) {
        self.motor.off();
        drop(self);
        info!("GPIO released");
    }
}

// ── RangingPort implementation ────────────────────────────────

impl<Trig, Echo, Vib, Btn, D, C> RangingPort for HardwareAdapter<Trig, Echo, Vib, Btn, D, C>
where
    Trig: OutputPin,
    Echo: InputPin,
    Vib: OutputPin,
    D: DelayNs,
    C: TimePort,
{
    fn measure(&mut self) -> DistanceReading {
        self.ranger.measure()
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<Trig, Echo, Vib, Btn, D, C> ButtonPort for HardwareAdapter<Trig, Echo, Vib, Btn, D, C>
where
    Vib: OutputPin,
    Btn: InputPin,
{
    fn is_pressed(&mut self) -> bool {
        // Active low: pull-up holds the line HIGH while released.
        self.button.is_low().unwrap_or_else(|_| {
            warn!("button: {}, treating as released", SensorError::GpioReadFailed);
            false
        })
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<Trig, Echo, Vib, Btn, D, C> ActuatorPort for HardwareAdapter<Trig, Echo, Vib, Btn, D, C>
where
    Vib: OutputPin,
{
    fn set_vibration(&mut self, on: bool) {
        self.motor.set(on);
    }

    fn is_vibrating(&self) -> bool {
        self.motor.is_on()
    }

    fn all_off(&mut self) {
        self.motor.off();
    }
}
