//! Console event sink adapter.
//!
//! Implements [`EventSink`] by printing the user-facing status lines to
//! stdout and writing everything else to the logger.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, StopReason};
use crate::app::ports::EventSink;

/// Adapter that reports every [`AppEvent`] on the console.
pub struct ConsoleEventSink;

impl Default for ConsoleEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleEventSink {
    pub fn new() -> Self {
        Self
    }

    /// Status line printed to stdout for `event`, if it has one.
    pub fn status_line(event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::SystemToggled(state) => Some(format!("System turned {state}")),
            AppEvent::DistanceMeasured(reading) => Some(format!("Distance: {reading} cm")),
            AppEvent::Stopped(StopReason::Interrupted) => Some("\nStopped by user (Ctrl+C).".into()),
            _ => None,
        }
    }
}

impl EventSink for ConsoleEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if let Some(line) = Self::status_line(event) {
            println!("{line}");
        }

        match event {
            AppEvent::Started(state) => {
                info!("START | system={}", state);
            }
            AppEvent::SystemToggled(state) => {
                info!("STATE | system={}", state);
            }
            AppEvent::DistanceMeasured(reading) => {
                if reading.is_fault() {
                    warn!("RANGE | fault");
                } else {
                    debug!("RANGE | {} cm", reading);
                }
            }
            AppEvent::ObstacleDetected(reading) => {
                info!("ALERT | obstacle at {} cm", reading);
            }
            AppEvent::ObstacleCleared => {
                info!("ALERT | cleared");
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | system={} alert={:?} | iter={} meas={} faults={} alerts={} | last={}",
                    t.system,
                    t.alert,
                    t.iterations,
                    t.measurements,
                    t.faults,
                    t.alerts,
                    t.last_reading.map_or_else(|| "-".to_owned(), |r| format!("{r} cm")),
                );
            }
            AppEvent::Stopped(reason) => {
                info!("STOP | reason={:?}", reason);
            }
        }
    }
}
