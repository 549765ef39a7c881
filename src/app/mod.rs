//! Application core: the sensing-and-alert control loop, zero direct I/O.
//!
//! All interaction with GPIO, the camera/overlay service and speech happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod frame;
pub mod ports;
pub mod service;
