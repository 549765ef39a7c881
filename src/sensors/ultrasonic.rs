//! HC-SR04 ultrasonic rangefinder driven by echo timing.
//!
//! ## Measurement sequence
//!
//! 1. TRIG low, settle for `trigger_settle_ms`.
//! 2. TRIG high for `trigger_pulse_us`, then low: one ultrasonic burst.
//! 3. Poll ECHO while it is low.  `t0` is refreshed on every low sample, so
//!    it ends up as the last moment the line was still low.
//! 4. Poll ECHO while it is high, refreshing `t1` the same way.
//! 5. `distance = (t1 - t0) * speed_of_sound / 2`, rounded to 0.01 cm.
//!
//! Both wait loops are bounded by `echo_timeout_ms`.  A missed edge or a GPIO
//! error yields [`DistanceReading::Fault`], which compares as
//! [`FAULT_DISTANCE_CM`] and therefore never trips an alert.
//!
//! Edge capture is polling-based and best-effort; precision depends on how
//! quickly the host schedules the polling thread.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{trace, warn};
use serde::Serialize;

use crate::app::ports::TimePort;
use crate::config::SystemConfig;
use crate::error::SensorError;

/// Numeric stand-in for a failed measurement (cm).  Always above any valid
/// alert threshold.
pub const FAULT_DISTANCE_CM: f64 = 1000.0;

/// One rangefinder result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DistanceReading {
    /// Distance in centimetres, two-decimal precision.
    Measured(f64),
    /// The echo timed out or the GPIO failed.
    Fault,
}

impl DistanceReading {
    /// Distance in centimetres; [`FAULT_DISTANCE_CM`] for a fault.
    pub fn cm(self) -> f64 {
        match self {
            Self::Measured(cm) => cm,
            Self::Fault => FAULT_DISTANCE_CM,
        }
    }

    pub fn is_fault(self) -> bool {
        matches!(self, Self::Fault)
    }

    /// True when the reading is strictly closer than `threshold_cm`.
    pub fn is_within(self, threshold_cm: f64) -> bool {
        self.cm() < threshold_cm
    }
}

impl fmt::Display for DistanceReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.cm())
    }
}

/// Convert an echo pulse (µs timestamps) into centimetres.
pub fn distance_from_pulse(t0_us: u64, t1_us: u64, speed_cm_per_s: f64) -> f64 {
    let pulse_secs = t1_us.saturating_sub(t0_us) as f64 / 1_000_000.0;
    round_hundredths(pulse_secs * speed_cm_per_s / 2.0)
}

fn round_hundredths(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Echo-timing rangefinder over `embedded-hal` pins.
pub struct UltrasonicRanger<Trig, Echo, D, C> {
    trig: Trig,
    echo: Echo,
    delay: D,
    clock: C,
    timeout_us: u64,
    settle_ms: u32,
    pulse_us: u32,
    speed_cm_per_s: f64,
}

impl<Trig, Echo, D, C> UltrasonicRanger<Trig, Echo, D, C>
where
    Trig: OutputPin,
    Echo: InputPin,
    D: DelayNs,
    C: TimePort,
{
    pub fn new(trig: Trig, echo: Echo, delay: D, clock: C, config: &SystemConfig) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
            timeout_us: config.echo_timeout_us(),
            settle_ms: config.trigger_settle_ms,
            pulse_us: config.trigger_pulse_us,
            speed_cm_per_s: config.speed_of_sound_cm_per_s,
        }
    }

    /// Run one full measurement.  Never blocks longer than the settle time
    /// plus two echo timeouts.
    pub fn measure(&mut self) -> DistanceReading {
        match self.try_measure() {
            Ok(cm) => DistanceReading::Measured(cm),
            Err(e) => {
                warn!("ranging: {e}, reporting fault distance");
                DistanceReading::Fault
            }
        }
    }

    fn try_measure(&mut self) -> Result<f64, SensorError> {
        self.fire_trigger()?;

        let t0 = self.wait_while_level(false)?;
        let t1 = self.wait_while_level(true)?;
        trace!("ranging: echo pulse {} us", t1.saturating_sub(t0));

        Ok(distance_from_pulse(t0, t1, self.speed_cm_per_s))
    }

    fn fire_trigger(&mut self) -> Result<(), SensorError> {
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_ms(self.settle_ms);

        self.trig.set_high().map_err(|_| SensorError::GpioWriteFailed)?;
        self.delay.delay_us(self.pulse_us);
        self.trig.set_low().map_err(|_| SensorError::GpioWriteFailed)
    }

    /// Spin while ECHO reads `high`, returning the timestamp of the last
    /// sample that still matched.
    fn wait_while_level(&mut self, high: bool) -> Result<u64, SensorError> {
        let start = self.clock.uptime_us();
        let mut last = start;

        loop {
            let level = self.echo.is_high().map_err(|_| SensorError::GpioReadFailed)?;
            if level != high {
                return Ok(last);
            }
            last = self.clock.uptime_us();
            if last.saturating_sub(start) > self.timeout_us {
                return Err(SensorError::EchoTimeout);
            }
        }
    }
}
