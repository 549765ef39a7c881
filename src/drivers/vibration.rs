//! Vibration motor driver (transistor-switched, active HIGH).
//!
//! A dumb on/off actuator over an `embedded-hal` output pin.  The pin is
//! driven LOW when the driver is dropped, so an unwinding panic or an early
//! return still de-energises the motor.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Off,
    On,
}

pub struct VibrationMotor<P: OutputPin> {
    pin: P,
    state: MotorState,
}

impl<P: OutputPin> VibrationMotor<P> {
    /// Take ownership of the pin and force it LOW.
    pub fn new(pin: P) -> Self {
        let mut motor = Self {
            pin,
            state: MotorState::On,
        };
        motor.off();
        motor
    }

    pub fn set(&mut self, on: bool) {
        if on {
            self.on();
        } else {
            self.off();
        }
    }

    pub fn on(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.state = MotorState::On,
            Err(_) => warn!("vibration: {}", ActuatorError::GpioWriteFailed),
        }
    }

    pub fn off(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.state = MotorState::Off,
            Err(_) => warn!("vibration: {}", ActuatorError::GpioWriteFailed),
        }
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == MotorState::On
    }
}

impl<P: OutputPin> Drop for VibrationMotor<P> {
    fn drop(&mut self) {
        let _ = self.pin.set_low();
    }
}
