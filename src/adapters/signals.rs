//! SIGINT / SIGTERM → cooperative quit flag.
//!
//! The handlers only set an atomic; the control loop checks it between
//! iterations and then runs the normal shutdown path.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use log::debug;
use signal_hook::consts::{SIGINT, SIGTERM};

use crate::error::InitError;

/// Register both termination signals against one shared flag.
pub fn install_interrupt_flag() -> Result<Arc<AtomicBool>, InitError> {
    let flag = Arc::new(AtomicBool::new(false));
    for sig in [SIGINT, SIGTERM] {
        signal_hook::flag::register(sig, Arc::clone(&flag)).map_err(|_| InitError::SignalHandler)?;
    }
    debug!("signals: SIGINT/SIGTERM handlers installed");
    Ok(flag)
}
