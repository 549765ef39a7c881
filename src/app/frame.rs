//! Frame and overlay value types shared by the loop and frame adapters.

use core::fmt;

/// Pixel position of a text baseline origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// RGB text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const GREEN: Colour = Colour { r: 0, g: 255, b: 0 };
pub const RED: Colour = Colour { r: 255, g: 0, b: 0 };

/// Where status text is drawn on every frame.
pub const STATUS_ORIGIN: Point = Point::new(10, 30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOverlay {
    pub text: String,
    pub origin: Point,
    pub colour: Colour,
}

/// One captured frame and the text drawn onto it this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub sequence: u64,
    pub width: u32,
    pub height: u32,
    pub overlays: Vec<TextOverlay>,
}

impl Frame {
    pub fn new(sequence: u64, width: u32, height: u32) -> Self {
        Self {
            sequence,
            width,
            height,
            overlays: Vec::new(),
        }
    }

    /// Overlay texts joined with " | ", for logs.
    pub fn caption(&self) -> String {
        self.overlays
            .iter()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame #{} {}x{} [{}]",
            self.sequence,
            self.width,
            self.height,
            self.caption()
        )
    }
}
