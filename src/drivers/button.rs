//! Timestamp-debounced toggle button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with the internal pull-up enabled: the pin
//! reads LOW while held.  The control loop samples the raw level once per
//! iteration and feeds it to [`ToggleDebouncer::poll`] together with the
//! current monotonic time.
//!
//! ## Debounce
//!
//! A pressed sample produces [`ButtonEdge::Pressed`] and records the press
//! time.  Every further sample within `window_ms` of that time is ignored.
//! Nothing blocks, so frame capture keeps running during the window.
//!
//! The check is level-based: a button still held when the window expires is
//! accepted as a new press.

/// Per-iteration button result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    None,
    Pressed,
}

pub struct ToggleDebouncer {
    window_ms: u64,
    last_press_ms: Option<u64>,
}

impl ToggleDebouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_press_ms: None,
        }
    }

    /// Call once per loop iteration.
    /// `pressed` is the raw level (`true` = pin LOW), `now_ms` monotonic time.
    pub fn poll(&mut self, pressed: bool, now_ms: u64) -> ButtonEdge {
        if !pressed {
            return ButtonEdge::None;
        }

        let armed = self
            .last_press_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= self.window_ms);
        if !armed {
            return ButtonEdge::None;
        }

        self.last_press_ms = Some(now_ms);
        ButtonEdge::Pressed
    }
}
