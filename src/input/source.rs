//! Raw key acquisition: the one capability the debouncer needs from a platform.

use std::collections::VecDeque;
use std::io::{self, Read};

use super::decoder::KeyDecoder;
use super::keys::{KeyCode, KEY_NONE};
use super::native::{native_to_key, NativeKeyRecord};
use crate::error::BackendError;

/// Maximum raw bytes consumed from a terminal per poll cycle.
pub const INPUT_BUFFER_LEN: usize = 32;

/// Something that can report the keys seen since it was last asked.
///
/// Implementations must return immediately with whatever is available and
/// never wait for more input.
pub trait KeySource {
    /// Append every key code seen since the previous call to `keys`.
    ///
    /// # Errors
    /// A failing OS read is reported as [`BackendError::Os`].
    fn poll_keys(&mut self, keys: &mut Vec<KeyCode>) -> Result<(), BackendError>;
}

impl<S: KeySource + ?Sized> KeySource for &mut S {
    fn poll_keys(&mut self, keys: &mut Vec<KeyCode>) -> Result<(), BackendError> {
        (**self).poll_keys(keys)
    }
}

/// Byte-stream source: reads one burst from `reader` and decodes escape
/// sequences with [`KeyDecoder`].
///
/// The reader is expected to behave like a terminal in zero-timeout mode:
/// `Ok(0)` or `WouldBlock` when nothing is pending.
pub struct TerminalKeys<R> {
    reader: R,
    buf: [u8; INPUT_BUFFER_LEN],
}

impl<R: Read> TerminalKeys<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: [0; INPUT_BUFFER_LEN],
        }
    }

    fn read_burst(&mut self) -> Result<usize, BackendError> {
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(0),
                Err(e) => return Err(BackendError::os("read", e)),
            }
        }
    }
}

impl<R: Read> KeySource for TerminalKeys<R> {
    fn poll_keys(&mut self, keys: &mut Vec<KeyCode>) -> Result<(), BackendError> {
        let n = self.read_burst()?;
        if n > 0 {
            log::trace!("read {} raw input bytes: {:?}", n, &self.buf[..n]);
        }
        KeyDecoder::decode(&self.buf[..n], keys);
        Ok(())
    }
}

/// Record source for platforms whose console reports discrete key events.
///
/// The platform layer pushes records as it receives them. Each poll drains
/// the queue, keeps key-down records and maps them through the native
/// key table.
#[derive(Debug, Default)]
pub struct NativeKeyQueue {
    pending: VecDeque<NativeKeyRecord>,
}

impl NativeKeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: NativeKeyRecord) {
        self.pending.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Extend<NativeKeyRecord> for NativeKeyQueue {
    fn extend<T: IntoIterator<Item = NativeKeyRecord>>(&mut self, iter: T) {
        self.pending.extend(iter);
    }
}

impl KeySource for NativeKeyQueue {
    fn poll_keys(&mut self, keys: &mut Vec<KeyCode>) -> Result<(), BackendError> {
        keys.extend(
            self.pending
                .drain(..)
                .map(|record| native_to_key(&record))
                .filter(|&key| key != KEY_NONE),
        );
        Ok(())
    }
}
