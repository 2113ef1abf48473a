//! Frame rendering: framebuffer pixels to terminal control sequences.
//!
//! The pipeline per pixel is:
//!
//! 1. **Gamma correction** - optional square-root curve, applied in place
//! 2. **Color coalescing** - a true-color escape only when RGB changes
//! 3. **Glyph selection** - gradient bucket lookup for the active character set
//!
//! # Character Sets
//!
//! - `Ascii` - 70-level ASCII density ramp
//! - `Block` - four Unicode shade blocks
//! - `Braille` - braille patterns grouped by dot count, randomly dithered

mod encoder;
pub mod gamma;
pub mod gradient;
pub mod sgr;

pub use encoder::{buffer_size, EncodedFrame, FrameEncoder, Pixel};
pub use gamma::{gamma_correct, gamma_correct_pixel};
