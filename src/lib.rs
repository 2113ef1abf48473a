//! termframe library crate.
//!
//! Turns a fixed-size pixel framebuffer into terminal escape sequences and
//! raw terminal keystrokes into debounced press/release events.

pub mod backend;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod terminal;
