//! Smart-glasses controller library.
//!
//! Exposes the sensing-and-alert control loop and its adapters for
//! integration testing.  Raspberry Pi pin acquisition is guarded by the `rpi`
//! feature; everything else builds and runs on any host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod alert;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod sensors;
pub mod state;
