//! Raspberry Pi GPIO acquisition (rppal).
//!
//! Claims the four BCM pins from [`crate::pins`], configures their direction
//! and pull, and assembles the [`HardwareAdapter`].  Pins already claimed when
//! a later claim fails are dropped on the error path, which restores their
//! previous mode.

use log::{error, info};
use rppal::gpio::{Gpio, InputPin, OutputPin, Pin};
use rppal::hal::Delay;

use crate::adapters::hardware::HardwareAdapter;
use crate::adapters::time::MonotonicClock;
use crate::config::SystemConfig;
use crate::drivers::vibration::VibrationMotor;
use crate::error::InitError;
use crate::pins;
use crate::sensors::UltrasonicRanger;

/// The hardware adapter as wired on the Pi.
pub type PiHardware = HardwareAdapter<OutputPin, InputPin, OutputPin, InputPin, Delay, MonotonicClock>;

pub fn open(config: &SystemConfig, clock: MonotonicClock) -> Result<PiHardware, InitError> {
    let gpio = Gpio::new().map_err(|e| {
        error!("GPIO: {e}");
        InitError::GpioUnavailable
    })?;

    let trig = claim(&gpio, pins::TRIG_GPIO)?.into_output_low();
    let echo = claim(&gpio, pins::ECHO_GPIO)?.into_input();
    let vibration = claim(&gpio, pins::VIBRATION_GPIO)?.into_output_low();
    let button = claim(&gpio, pins::BUTTON_GPIO)?.into_input_pullup();

    info!(
        "GPIO: TRIG={} ECHO={} VIBRATION={} BUTTON={} (pull-up)",
        pins::TRIG_GPIO,
        pins::ECHO_GPIO,
        pins::VIBRATION_GPIO,
        pins::BUTTON_GPIO
    );

    let ranger = UltrasonicRanger::new(trig, echo, Delay::new(), clock, config);
    Ok(HardwareAdapter::new(ranger, VibrationMotor::new(vibration), button))
}

fn claim(gpio: &Gpio, pin: u8) -> Result<Pin, InitError> {
    gpio.get(pin).map_err(|e| {
        error!("GPIO{pin}: {e}");
        InitError::PinUnavailable(pin)
    })
}
