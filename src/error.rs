//! Unified error types for the smart-glasses controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they can
//! be passed through the loop and event sinks without allocation.
//!
//! Only [`InitError`] and unexpected [`FrameError`]s end the process.  Sensor,
//! actuator and speech errors are recovered where they happen.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The rangefinder could not produce a reading.
    Sensor(SensorError),
    /// A GPIO output could not be driven.
    Actuator(ActuatorError),
    /// A resource failed to open or configure at startup.
    Init(InitError),
    /// The frame/overlay service failed mid-loop.
    Frame(FrameError),
    /// The text-to-speech invocation failed.
    Speech(SpeechError),
    /// A configuration value violates an invariant.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Speech(e) => write!(f, "speech: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The echo line did not change level before the deadline.
    EchoTimeout,
    /// GPIO read returned an error.
    GpioReadFailed,
    /// GPIO write (trigger pulse) returned an error.
    GpioWriteFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EchoTimeout => write!(f, "echo not observed before deadline"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The GPIO character device / register block could not be opened.
    GpioUnavailable,
    /// A specific BCM pin could not be claimed.
    PinUnavailable(u8),
    /// The signal handler could not be installed.
    SignalHandler,
    /// The frame source could not be opened.
    FrameSource,
    /// The speech worker thread could not be spawned.
    SpeechWorker,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioUnavailable => write!(f, "GPIO peripheral unavailable"),
            Self::PinUnavailable(pin) => write!(f, "GPIO{pin} unavailable"),
            Self::SignalHandler => write!(f, "signal handler registration failed"),
            Self::FrameSource => write!(f, "frame source failed to open"),
            Self::SpeechWorker => write!(f, "speech worker failed to start"),
        }
    }
}

impl std::error::Error for InitError {}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Frame errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Frame capture returned no data.
    CaptureFailed,
    /// The service has already been closed.
    Closed,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CaptureFailed => write!(f, "frame capture failed"),
            Self::Closed => write!(f, "frame service closed"),
        }
    }
}

impl std::error::Error for FrameError {}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Speech errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechError {
    /// The synthesizer process could not be spawned.
    SpawnFailed,
    /// The synthesizer exited with a non-zero status.
    ExitStatus(i32),
    /// The utterance does not fit the fixed-capacity message buffer.
    TooLong,
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpawnFailed => write!(f, "synthesizer spawn failed"),
            Self::ExitStatus(code) => write!(f, "synthesizer exited with status {code}"),
            Self::TooLong => write!(f, "utterance too long"),
        }
    }
}

impl std::error::Error for SpeechError {}

impl From<SpeechError> for Error {
    fn from(e: SpeechError) -> Self {
        Self::Speech(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
