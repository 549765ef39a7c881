//! Background speech adapter.
//!
//! Uses an `embassy-sync` bounded channel to bridge the synchronous control
//! loop with a dedicated synthesis thread, so a slow `espeak` run never
//! stalls button polling or ranging.
//!
//! ```text
//! ┌──────────────┐  SpeechMsg   ┌──────────────┐   spawn    ┌────────┐
//! │ Control Loop │─────────────▶│ Speech Worker│───────────▶│ espeak │
//! │  (sync)      │  try_send    │ (block_on)   │            └────────┘
//! └──────────────┘              └──────────────┘
//! ```
//!
//! `speak()` never blocks.  When the queue is full the oldest pending
//! utterance is discarded to make room for the newest one.

use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::{debug, info, warn};

use crate::app::ports::SpeechPort;
use crate::error::{InitError, SpeechError};

/// Longest utterance accepted, in bytes.
pub const MAX_UTTERANCE: usize = 64;

/// Pending utterances before the oldest is dropped.
pub const SPEECH_QUEUE_DEPTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechMsg {
    Say(heapless::String<MAX_UTTERANCE>),
    Stop,
}

pub type SpeechChannel = Channel<CriticalSectionRawMutex, SpeechMsg, SPEECH_QUEUE_DEPTH>;

/// Process-wide queue used by the binary.
pub static SPEECH_CHANNEL: SpeechChannel = Channel::new();

// ───────────────────────────────────────────────────────────────
// Synthesizer
// ───────────────────────────────────────────────────────────────

/// Something that can turn text into sound, synchronously.
pub trait Synthesizer {
    fn say(&mut self, text: &str) -> Result<(), SpeechError>;
}

/// Runs the `espeak` command-line synthesizer.
pub struct EspeakSynthesizer {
    program: String,
}

impl Default for EspeakSynthesizer {
    fn default() -> Self {
        Self::new("espeak")
    }
}

impl EspeakSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `espeak` pronounces compact words more clearly; spaces are removed.
    pub fn prepare(text: &str) -> String {
        text.replace(' ', "")
    }
}

impl Synthesizer for EspeakSynthesizer {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        let status = Command::new(&self.program)
            .arg(Self::prepare(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|_| SpeechError::SpawnFailed)?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::ExitStatus(status.code().unwrap_or(-1)))
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Queue + worker
// ───────────────────────────────────────────────────────────────

/// Push `msg`, evicting the oldest pending message if the queue is full.
/// Returns `true` if something was evicted.
pub fn enqueue_latest(channel: &SpeechChannel, msg: SpeechMsg) -> bool {
    match channel.try_send(msg) {
        Ok(()) => false,
        Err(TrySendError::Full(msg)) => {
            let evicted = channel.try_receive().ok();
            if let Some(SpeechMsg::Say(text)) = &evicted {
                debug!("speech: dropping queued '{}'", text);
            }
            // A single producer: the slot just freed is still free.
            let _ = channel.try_send(msg);
            evicted.is_some()
        }
    }
}

/// Speech port backed by a worker thread.
pub struct SpeechService {
    channel: &'static SpeechChannel,
    worker: Option<JoinHandle<()>>,
}

impl SpeechService {
    /// Spawn the worker thread draining `channel` into `synth`.
    pub fn start<S>(channel: &'static SpeechChannel, synth: S) -> Result<Self, InitError>
    where
        S: Synthesizer + Send + 'static,
    {
        let worker = thread::Builder::new()
            .name("speech".into())
            .spawn(move || run_worker(channel, synth))
            .map_err(|_| InitError::SpeechWorker)?;

        info!("speech: worker started");
        Ok(Self {
            channel,
            worker: Some(worker),
        })
    }

    /// Stop the worker after it finishes the utterance in progress.
    /// Idempotent.
    pub fn shutdown(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        enqueue_latest(self.channel, SpeechMsg::Stop);
        if worker.join().is_err() {
            warn!("speech: worker panicked");
        } else {
            info!("speech: worker stopped");
        }
    }
}

impl SpeechPort for SpeechService {
    fn speak(&mut self, text: &str) {
        if self.worker.is_none() {
            warn!("speech: service stopped, dropping '{}'", text);
            return;
        }
        match heapless::String::try_from(text) {
            Ok(text) => {
                enqueue_latest(self.channel, SpeechMsg::Say(text));
            }
            Err(()) => warn!("speech: {}", SpeechError::TooLong),
        }
    }
}

impl Drop for SpeechService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker<S: Synthesizer>(channel: &'static SpeechChannel, mut synth: S) {
    loop {
        match futures_lite::future::block_on(channel.receive()) {
            SpeechMsg::Say(text) => {
                debug!("speech: saying '{}'", text);
                if let Err(e) = synth.say(&text) {
                    warn!("Text-to-speech error: {e}");
                }
            }
            SpeechMsg::Stop => break,
        }
    }
}
