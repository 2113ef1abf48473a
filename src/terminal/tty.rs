//! Key source over the process's standard input descriptor.

use std::io::{self, Read};

use super::raw_mode::stdin_is_tty;
use crate::error::BackendError;
use crate::input::{KeyCode, KeySource, TerminalKeys};

/// Unbuffered reads straight from `STDIN_FILENO`.
///
/// `std::io::Stdin` keeps its own buffer, which would hide pending bytes
/// from the flush after each burst.
#[derive(Debug, Default)]
pub struct StdinFd;

impl Read for StdinFd {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // SAFETY: buf is valid for writes of buf.len() bytes.
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(n as usize)
    }
}

/// Terminal keyboard: one zero-timeout burst per poll, then discard
/// whatever else is queued so a stale burst is never decoded later.
///
/// Reads only happen when stdin is a terminal. Otherwise the source
/// reports no keys, since a pipe or file would block or replay.
pub struct TtyKeys {
    keys: TerminalKeys<StdinFd>,
    is_tty: bool,
}

impl TtyKeys {
    pub fn new() -> Self {
        Self {
            keys: TerminalKeys::new(StdinFd),
            is_tty: stdin_is_tty(),
        }
    }

    pub fn is_tty(&self) -> bool {
        self.is_tty
    }
}

impl Default for TtyKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySource for TtyKeys {
    fn poll_keys(&mut self, keys: &mut Vec<KeyCode>) -> Result<(), BackendError> {
        if !self.is_tty {
            return Ok(());
        }

        self.keys.poll_keys(keys)?;

        if unsafe { libc::tcflush(libc::STDIN_FILENO, libc::TCIFLUSH) } != 0 {
            return Err(BackendError::last_os("tcflush"));
        }
        Ok(())
    }
}
