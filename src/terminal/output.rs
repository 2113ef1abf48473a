//! Output sink: where encoded frames and title sequences are written.

use std::io::{self, Write};

use crate::error::BackendError;
use crate::render::sgr::{self, RESET};
use crate::render::EncodedFrame;

/// Writes encoded frames to a byte stream, usually stdout.
///
/// Every frame goes out as consecutive `write_all` calls followed by a
/// single flush. Write failures are fatal and named `write` or `flush`.
pub struct OutputSink<W = io::Stdout> {
    out: W,
    frames_written: u64,
}

impl OutputSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            frames_written: 0,
        }
    }

    /// Write one frame: the prelude (if any) then the body, then flush.
    pub fn write_frame(&mut self, frame: &EncodedFrame<'_>) -> Result<usize, BackendError> {
        if !frame.prelude.is_empty() {
            self.out
                .write_all(frame.prelude)
                .map_err(|e| BackendError::os("write", e))?;
        }
        self.out
            .write_all(frame.body)
            .map_err(|e| BackendError::os("write", e))?;
        self.flush()?;

        self.frames_written += 1;
        Ok(frame.len())
    }

    /// Set the terminal window title with an OSC 2 sequence.
    pub fn set_window_title(&mut self, title: &str) -> Result<(), BackendError> {
        self.out
            .write_all(&sgr::window_title(title))
            .map_err(|e| BackendError::os("write", e))?;
        self.flush()
    }

    /// Reset attributes and leave the cursor on a fresh line.
    pub fn finish(&mut self) -> Result<(), BackendError> {
        self.out
            .write_all(RESET)
            .and_then(|()| self.out.write_all(b"\n"))
            .map_err(|e| BackendError::os("write", e))?;
        self.flush()
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush(&mut self) -> Result<(), BackendError> {
        self.out.flush().map_err(|e| BackendError::os("flush", e))
    }
}
