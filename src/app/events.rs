//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them.

use serde::Serialize;

use crate::alert::AlertState;
use crate::sensors::DistanceReading;
use crate::state::SystemState;

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The control loop has started (carries the initial state).
    Started(SystemState),

    /// A confirmed button press flipped the system state.
    SystemToggled(SystemState),

    /// A fresh rangefinder result (only while ON).
    DistanceMeasured(DistanceReading),

    /// An alert episode began.
    ObstacleDetected(DistanceReading),

    /// The current alert episode ended.
    ObstacleCleared,

    /// Periodic counters snapshot.
    Telemetry(TelemetryData),

    /// The loop exited and cleanup finished.
    Stopped(StopReason),
}

/// Why the control loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// The quit key was pressed.
    QuitKey,
    /// SIGINT / SIGTERM was received.
    Interrupted,
    /// An unrecoverable fault ended the loop.
    Fault,
}

/// A point-in-time snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetryData {
    pub system: SystemState,
    pub alert: AlertState,
    pub iterations: u64,
    pub measurements: u64,
    pub faults: u64,
    pub alerts: u64,
    pub last_reading: Option<DistanceReading>,
}
