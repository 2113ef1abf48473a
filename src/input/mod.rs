//! Keyboard input: raw terminal bytes or native key records to debounced
//! press/release events.
//!
//! ```text
//! KeySource ──> KeyDecoder / native table ──> InputDebouncer ──> EventQueue
//! ```
//!
//! Only [`KeySource`] is platform specific. Everything downstream of it
//! works on abstract key codes.

mod debounce;
mod decoder;
pub mod keys;
mod native;
mod source;

pub use debounce::{EventQueue, EventRecord, InputDebouncer, KeyTimestampTable, EVENT_QUEUE_LEN};
pub use decoder::KeyDecoder;
pub use keys::KeyCode;
pub use native::{native_to_key, vk, NativeKeyRecord};
pub use source::{KeySource, NativeKeyQueue, TerminalKeys, INPUT_BUFFER_LEN};
