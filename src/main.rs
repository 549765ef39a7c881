//! Smart Glasses: Main Entry Point
//!
//! Hexagonal architecture with a single cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        TerminalOverlay     SpeechService      │
//! │  (Ranging+Button+Act.)  (FramePort)         (SpeechPort)       │
//! │  ConsoleEventSink       MonotonicClock      signal flag        │
//! │  (EventSink)            (TimePort)          (SIGINT/SIGTERM)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Debounce · System state · Alert latch                 │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::{error, info};

use smart_glasses::adapters::gpio;
use smart_glasses::adapters::log_sink::ConsoleEventSink;
use smart_glasses::adapters::overlay::TerminalOverlay;
use smart_glasses::adapters::signals::install_interrupt_flag;
use smart_glasses::adapters::speech::{EspeakSynthesizer, SPEECH_CHANNEL, SpeechService};
use smart_glasses::adapters::time::MonotonicClock;
use smart_glasses::app::events::StopReason;
use smart_glasses::app::service::AppService;
use smart_glasses::config::SystemConfig;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Smart Glasses v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Fixed configuration ────────────────────────────────
    let config = SystemConfig::default();
    config.validate().context("invalid built-in configuration")?;
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Acquire resources ──────────────────────────────────
    // Anything acquired before a later failure is released by its Drop impl.
    let interrupt = install_interrupt_flag().context("installing signal handlers")?;
    let clock = MonotonicClock::new();
    let mut hw = gpio::open(&config, clock).context("opening GPIO")?;
    let mut frames = TerminalOverlay::open(config.frame_width, config.frame_height)
        .context("opening frame source")?;
    let mut speech = SpeechService::start(&SPEECH_CHANNEL, EspeakSynthesizer::default())
        .context("starting speech worker")?;
    let mut sink = ConsoleEventSink::new();

    println!("Smart Glasses System Initialized");
    println!("Press the button to toggle system ON/OFF.");
    println!("Press 'q' to quit.");

    // ── 4. Control loop ───────────────────────────────────────
    let mut app = AppService::new(config);
    app.start(&mut sink);

    let outcome = app.run(&mut hw, &mut frames, &mut speech, &mut sink, &clock, &interrupt);
    let reason = match &outcome {
        Ok(reason) => *reason,
        Err(e) => {
            error!("Error: {e}");
            StopReason::Fault
        }
    };

    // ── 5. Cleanup (every exit path) ──────────────────────────
    app.shutdown(&mut hw, &mut frames, &mut sink, reason);
    hw.release_all();
    speech.shutdown();
    println!("Smart Glasses System Shutdown Complete");

    outcome.map(drop).context("control loop failed")
}
