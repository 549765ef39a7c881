//! Alert state machine.
//!
//! Turns one distance reading plus the system on/off flag into actuator and
//! notification decisions.  A single latch (`Idle` / `Alerting`) is the whole
//! anti-spam mechanism: an obstacle that stays in range produces one spoken
//! alert and continuous vibration.
//!
//! ## Transitions
//!
//! | system | reading            | from       | to         | vibrate | speak |
//! |--------|--------------------|------------|------------|---------|-------|
//! | off    | any                | any        | `Idle`     | no      | no    |
//! | on     | `< threshold`      | `Idle`     | `Alerting` | yes     | yes   |
//! | on     | `< threshold`      | `Alerting` | `Alerting` | yes     | no    |
//! | on     | `>= threshold`/FAULT | any      | `Idle`     | no      | no    |
//!
//! There is no hysteresis band: a reading that oscillates across the
//! threshold re-arms and re-fires the spoken alert on every crossing.

use log::debug;
use serde::Serialize;

use crate::sensors::DistanceReading;

/// Whether a notification has already fired for the current episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AlertState {
    #[default]
    Idle,
    Alerting,
}

/// Decision produced by one [`AlertMachine::evaluate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlertOutput {
    /// Drive the vibration motor this cycle.
    pub vibrate: bool,
    /// Issue the "object detected" announcement now.
    pub speak_now: bool,
}

pub struct AlertMachine {
    threshold_cm: f64,
    state: AlertState,
}

impl AlertMachine {
    pub fn new(threshold_cm: f64) -> Self {
        Self {
            threshold_cm,
            state: AlertState::Idle,
        }
    }

    /// Feed one cycle's inputs and advance the latch.
    pub fn evaluate(&mut self, system_on: bool, reading: DistanceReading) -> AlertOutput {
        if !system_on {
            self.reset();
            return AlertOutput::default();
        }

        if reading.is_within(self.threshold_cm) {
            let speak_now = self.state == AlertState::Idle;
            if speak_now {
                debug!("latch: Idle -> Alerting at {reading} cm");
                self.state = AlertState::Alerting;
            }
            AlertOutput {
                vibrate: true,
                speak_now,
            }
        } else {
            if self.state == AlertState::Alerting {
                debug!("latch: Alerting -> Idle at {reading} cm");
            }
            self.state = AlertState::Idle;
            AlertOutput::default()
        }
    }

    /// Cancel any in-progress episode.
    pub fn reset(&mut self) {
        if self.state == AlertState::Alerting {
            debug!("latch: episode cancelled");
        }
        self.state = AlertState::Idle;
    }

    pub fn state(&self) -> AlertState {
        self.state
    }
}
