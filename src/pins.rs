//! GPIO pin assignments for the smart-glasses harness (BCM numbering).
//!
//! Single source of truth: every adapter references this module rather than
//! hard-coding pin numbers.  The map is fixed at startup and never changes.

// ---------------------------------------------------------------------------
// HC-SR04 ultrasonic rangefinder
// ---------------------------------------------------------------------------

/// Digital output: a 10 µs HIGH pulse starts one ultrasonic burst.
pub const TRIG_GPIO: u8 = 23;
/// Digital input: HIGH for the duration of the echo round trip.
/// Routed through a 5 V → 3.3 V divider.
pub const ECHO_GPIO: u8 = 24;

// ---------------------------------------------------------------------------
// Haptics
// ---------------------------------------------------------------------------

/// Digital output: vibration motor driver (active HIGH).
pub const VIBRATION_GPIO: u8 = 18;

// ---------------------------------------------------------------------------
// User button (active-low with internal pull-up)
// ---------------------------------------------------------------------------

/// Momentary push-button toggling the system ON/OFF.
pub const BUTTON_GPIO: u8 = 27;
