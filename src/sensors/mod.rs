//! Sensor subsystem.
//!
//! Only one sensor is fitted: the HC-SR04 ultrasonic rangefinder in
//! [`ultrasonic`].  Each call produces a fresh [`DistanceReading`]; readings
//! are never cached across control-loop cycles.

pub mod ultrasonic;

pub use ultrasonic::{DistanceReading, FAULT_DISTANCE_CM, UltrasonicRanger, distance_from_pulse};
