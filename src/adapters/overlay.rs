//! Headless frame/overlay adapter.
//!
//! Stands in for the camera preview window on units without a display:
//! frames carry no pixels, overlay text is rendered through the logger
//! whenever it changes, and the quit key is a line containing `q` on stdin
//! (read by a detached reader thread).

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use log::{debug, info, trace};

use crate::app::frame::{Colour, Frame, Point, TextOverlay};
use crate::app::ports::FramePort;
use crate::error::{FrameError, InitError};

pub const WINDOW_TITLE: &str = "Smart Glasses Camera Feed";

pub struct TerminalOverlay {
    width: u32,
    height: u32,
    sequence: u64,
    last_caption: String,
    quit: Arc<AtomicBool>,
    closed: bool,
}

impl TerminalOverlay {
    /// Open the overlay and start watching stdin for the quit key.
    pub fn open(width: u32, height: u32) -> Result<Self, InitError> {
        let overlay = Self::with_quit_flag(width, height, Arc::new(AtomicBool::new(false)));
        let quit = Arc::clone(&overlay.quit);

        thread::Builder::new()
            .name("quit-key".into())
            .spawn(move || watch_stdin(&quit))
            .map_err(|_| InitError::FrameSource)?;

        info!("{}: {}x{} (headless)", WINDOW_TITLE, width, height);
        Ok(overlay)
    }

    /// Build without a stdin reader; `quit` is set by the caller.
    pub fn with_quit_flag(width: u32, height: u32, quit: Arc<AtomicBool>) -> Self {
        Self {
            width,
            height,
            sequence: 0,
            last_caption: String::new(),
            quit,
            closed: false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

fn watch_stdin(quit: &AtomicBool) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().eq_ignore_ascii_case("q") {
            quit.store(true, Ordering::Release);
            break;
        }
    }
}

impl FramePort for TerminalOverlay {
    fn capture_frame(&mut self) -> Result<Frame, FrameError> {
        if self.closed {
            return Err(FrameError::Closed);
        }
        self.sequence += 1;
        Ok(Frame::new(self.sequence, self.width, self.height))
    }

    fn draw_text(&mut self, frame: &mut Frame, text: &str, origin: Point, colour: Colour) {
        frame.overlays.push(TextOverlay {
            text: text.to_owned(),
            origin,
            colour,
        });
    }

    fn display(&mut self, frame: &Frame) {
        let caption = frame.caption();
        if caption != self.last_caption {
            debug!("{}: {}", WINDOW_TITLE, caption);
            self.last_caption = caption;
        }
        trace!("{frame}");
    }

    fn poll_quit_key(&mut self) -> bool {
        self.quit.load(Ordering::Acquire)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            info!("{}: closed after {} frames", WINDOW_TITLE, self.sequence);
        }
    }
}

impl Drop for TerminalOverlay {
    fn drop(&mut self) {
        self.close();
    }
}
