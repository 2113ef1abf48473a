//! The host-facing surface: draw frames, poll keys, keep time.

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::Rng;

use crate::clock::{self, Clock, MonotonicClock};
use crate::config::RenderConfig;
use crate::error::BackendError;
use crate::input::{InputDebouncer, KeyCode, KeySource};
use crate::render::FrameEncoder;
use crate::terminal::OutputSink;

/// One rendering and input backend for a fixed-size framebuffer.
///
/// Owns the encoder (with its output buffer and first-frame latch), the
/// debouncer (with its key timestamps), a key source, an output sink and
/// a clock. Everything runs on the caller's thread.
pub struct Backend<K, W = io::Stdout, C = MonotonicClock, R = StdRng> {
    encoder: FrameEncoder<R>,
    debouncer: InputDebouncer,
    keys: K,
    sink: OutputSink<W>,
    clock: C,
}

#[cfg(unix)]
impl Backend<crate::terminal::TtyKeys> {
    /// Backend for the controlling terminal: stdin keys, stdout frames,
    /// time measured from this call.
    ///
    /// Terminal input mode is not touched here; hold a
    /// [`RawModeGuard`](crate::terminal::RawModeGuard) for the lifetime of
    /// the backend.
    pub fn init(config: RenderConfig, width: usize, height: usize) -> Self {
        Self::with_parts(
            FrameEncoder::new(config, width, height),
            crate::terminal::TtyKeys::new(),
            OutputSink::stdout(),
            MonotonicClock::new(),
        )
    }
}

impl<K, W, C, R> Backend<K, W, C, R>
where
    K: KeySource,
    W: Write,
    C: Clock,
    R: Rng,
{
    pub fn with_parts(encoder: FrameEncoder<R>, keys: K, sink: OutputSink<W>, clock: C) -> Self {
        let debouncer = InputDebouncer::from_config(encoder.config());
        Self {
            encoder,
            debouncer,
            keys,
            sink,
            clock,
        }
    }

    /// Encode `framebuffer` and write it out. Returns the bytes written.
    ///
    /// # Errors
    /// `FramebufferSize` for a framebuffer of the wrong length, or a
    /// failing `write`/`flush`.
    pub fn draw_frame(&mut self, framebuffer: &mut [u32]) -> Result<usize, BackendError> {
        let frame = self.encoder.encode(framebuffer)?;
        self.sink.write_frame(&frame)
    }

    /// Run one input cycle; events are then drained with [`get_key`](Self::get_key).
    pub fn read_input(&mut self) -> Result<(), BackendError> {
        let now = self.clock.now_ms();
        self.debouncer.poll(&mut self.keys, now)?;
        Ok(())
    }

    /// Next `(pressed, key)` from the last input cycle, if any.
    pub fn get_key(&mut self) -> Option<(bool, KeyCode)> {
        self.debouncer
            .next_event()
            .map(|event| (event.pressed, event.key))
    }

    /// Milliseconds since the backend was created.
    pub fn ticks_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn sleep_ms(&self, ms: u32) {
        clock::sleep_ms(ms);
    }

    pub fn set_window_title(&mut self, title: &str) -> Result<(), BackendError> {
        self.sink.set_window_title(title)
    }

    /// Reset attributes so the shell prompt is not left colored.
    pub fn shutdown(&mut self) -> Result<(), BackendError> {
        self.sink.finish()
    }

    pub fn encoder(&self) -> &FrameEncoder<R> {
        &self.encoder
    }

    pub fn debouncer(&self) -> &InputDebouncer {
        &self.debouncer
    }

    pub fn sink(&self) -> &OutputSink<W> {
        &self.sink
    }

    pub fn keys_mut(&mut self) -> &mut K {
        &mut self.keys
    }
}
