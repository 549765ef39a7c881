//! System on/off state.
//!
//! Starts [`SystemState::Off`] at process start, is flipped only by a
//! confirmed button edge, and is never persisted.

use core::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SystemState {
    #[default]
    Off,
    On,
}

impl SystemState {
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Spoken status announcement for this state.
    pub fn announcement(self) -> &'static str {
        match self {
            Self::Off => "system OFF",
            Self::On => "system ON",
        }
    }
}

impl fmt::Display for SystemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::On => write!(f, "ON"),
        }
    }
}
