//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements          | Connects to                    |
//! |-------------|---------------------|--------------------------------|
//! | `hardware`  | RangingPort         | HC-SR04 over embedded-hal pins |
//! |             | ButtonPort          | toggle button                  |
//! |             | ActuatorPort        | vibration motor                |
//! | `gpio`      | (none)              | rppal pin acquisition (`rpi`)  |
//! | `log_sink`  | EventSink           | stdout + logger                |
//! | `overlay`   | FramePort           | headless preview, stdin quit   |
//! | `signals`   | (none)              | SIGINT / SIGTERM               |
//! | `speech`    | SpeechPort          | worker thread + espeak         |
//! | `time`      | TimePort            | `std::time::Instant`           |

#[cfg(feature = "rpi")]
pub mod gpio;
pub mod hardware;
pub mod log_sink;
pub mod overlay;
pub mod signals;
pub mod speech;
pub mod time;
