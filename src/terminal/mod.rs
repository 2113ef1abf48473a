//! Terminal plumbing - input mode, keyboard reads, frame output and shutdown.

mod output;
#[cfg(unix)]
mod raw_mode;
mod shutdown;
#[cfg(unix)]
mod tty;

pub use output::OutputSink;
#[cfg(unix)]
pub use raw_mode::{stdin_is_tty, RawModeGuard};
pub use shutdown::{setup_ctrlc_handler, shutdown_requested};
#[cfg(unix)]
pub use tty::{StdinFd, TtyKeys};
