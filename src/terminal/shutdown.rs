//! Termination signals: SIGINT (Ctrl-C), SIGTERM and SIGHUP all set one
//! flag. The host loop polls it and exits through its normal drop path, so
//! the terminal guard restores the saved settings even when the process is
//! killed or its terminal closes.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Install the process-wide termination handler. Can only succeed once.
pub fn setup_ctrlc_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst);
    })
}

/// Check whether a termination signal was received.
pub fn shutdown_requested() -> bool {
    SHUTDOWN_REQUESTED.load(Ordering::SeqCst)
}
