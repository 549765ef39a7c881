//! System configuration parameters
//!
//! Every threshold and timing constant used by the control loop.  Values are
//! fixed at compile time; the struct exists so they travel together, can be
//! validated once at startup, and can be logged.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sensors::FAULT_DISTANCE_CM;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alerting ---
    /// Obstacles strictly closer than this (cm) raise an alert.
    pub alert_threshold_cm: f64,

    // --- Ranging ---
    /// Upper bound for each echo wait loop (milliseconds).
    pub echo_timeout_ms: u32,
    /// Time TRIG is held low before the pulse (milliseconds).
    pub trigger_settle_ms: u32,
    /// Width of the TRIG pulse (microseconds).
    pub trigger_pulse_us: u32,
    /// Speed of sound used for the round-trip conversion (cm/s).
    pub speed_of_sound_cm_per_s: f64,

    // --- Button ---
    /// Edges within this window of the last accepted press are ignored (ms).
    pub debounce_ms: u32,

    // --- Reporting ---
    /// Emit a telemetry event every N loop iterations.
    pub telemetry_interval_ticks: u32,

    // --- Frame ---
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Alerting
            alert_threshold_cm: 40.0,

            // Ranging
            echo_timeout_ms: 1000,
            trigger_settle_ms: 50,
            trigger_pulse_us: 10,
            speed_of_sound_cm_per_s: 34_300.0, // 343 m/s

            // Button
            debounce_ms: 500,

            // Reporting
            telemetry_interval_ticks: 100,

            // Frame
            frame_width: 640,
            frame_height: 480,
        }
    }
}

impl SystemConfig {
    /// Reject values that would break the alerting or timing invariants.
    pub fn validate(&self) -> Result<()> {
        if self.alert_threshold_cm.is_nan() || self.alert_threshold_cm <= 0.0 {
            return Err(Error::Config("alert_threshold_cm must be positive"));
        }
        if self.alert_threshold_cm >= FAULT_DISTANCE_CM {
            return Err(Error::Config(
                "alert_threshold_cm must stay below the fault sentinel",
            ));
        }
        if self.echo_timeout_ms == 0 {
            return Err(Error::Config("echo_timeout_ms must be non-zero"));
        }
        if self.trigger_pulse_us == 0 {
            return Err(Error::Config("trigger_pulse_us must be non-zero"));
        }
        if self.speed_of_sound_cm_per_s.is_nan() || self.speed_of_sound_cm_per_s <= 0.0 {
            return Err(Error::Config("speed_of_sound_cm_per_s must be positive"));
        }
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if self.telemetry_interval_ticks == 0 {
            return Err(Error::Config("telemetry_interval_ticks must be non-zero"));
        }
        Ok(())
    }

    /// Echo deadline in microseconds.
    pub fn echo_timeout_us(&self) -> u64 {
        u64::from(self.echo_timeout_ms) * 1000
    }
}
