//! Input debouncing and actuator drivers.

pub mod button;
pub mod vibration;
