//! Frame encoder: framebuffer pixels to a terminal escape-sequence stream.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::gamma::gamma_correct_pixel;
use super::gradient::{self, ASCII_SOLID, EMPTY_PAIR, FULL_BLOCK, FULL_BRAILLE};
use super::sgr::{self, BOLD, CLEAR_SCREEN, CURSOR_HOME, ERASE_DISPLAY, RESET, TRUE_COLOR_LEN};
use crate::config::{CharacterSet, RenderConfig};
use crate::error::BackendError;

/// One framebuffer pixel.
///
/// Packed in a `u32` with blue in the least significant byte, then green,
/// red and alpha. Alpha is carried but never rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0 }
    }

    /// Low 24 bits of the packed form (alpha masked out).
    pub const fn rgb24(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Sum of the three color channels (0..=765).
    pub const fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

impl From<u32> for Pixel {
    fn from(packed: u32) -> Self {
        Self {
            b: packed as u8,
            g: (packed >> 8) as u8,
            r: (packed >> 16) as u8,
            a: (packed >> 24) as u8,
        }
    }
}

impl From<Pixel> for u32 {
    fn from(p: Pixel) -> Self {
        ((p.a as u32) << 24) | p.rgb24()
    }
}

/// Worst-case size in bytes of one encoded frame body.
///
/// Per pixel: one true-color escape when color is on, plus two glyphs.
/// Per row: one newline. Per frame: terminator, cursor-home, optional
/// bold and erase, and the trailing reset when any attribute was set.
pub fn buffer_size(config: &RenderConfig, width: usize, height: usize) -> usize {
    let per_pixel = if config.color_enabled { TRUE_COLOR_LEN } else { 0 }
        + config.character_set.glyph_pair_bytes();

    per_pixel * width * height
        + height
        + 1
        + CURSOR_HOME.len()
        + if config.bold_enabled { BOLD.len() } else { 0 }
        + if config.erase_enabled { ERASE_DISPLAY.len() } else { 0 }
        + if config.color_enabled || config.bold_enabled {
            RESET.len()
        } else {
            0
        }
}

/// An encoded frame ready for the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedFrame<'a> {
    /// Screen clear, present only on the first frame
    pub prelude: &'static [u8],
    /// Frame body, bounded by [`buffer_size`]
    pub body: &'a [u8],
}

impl EncodedFrame<'_> {
    pub fn len(&self) -> usize {
        self.prelude.len() + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Converts framebuffers of a fixed size into escape-sequence byte streams.
///
/// The output buffer is sized once from the config and dimensions and is
/// reused for every frame. The random source only affects braille dithering.
pub struct FrameEncoder<R = StdRng> {
    config: RenderConfig,
    width: usize,
    height: usize,
    buffer: Vec<u8>,
    capacity: usize,
    has_rendered_first_frame: bool,
    rng: R,
}

impl FrameEncoder<StdRng> {
    /// Create an encoder dithering from an entropy-seeded generator.
    pub fn new(config: RenderConfig, width: usize, height: usize) -> Self {
        Self::with_rng(config, width, height, StdRng::from_entropy())
    }

    /// Create an encoder whose dithering is reproducible from `seed`.
    pub fn seeded(config: RenderConfig, width: usize, height: usize, seed: u64) -> Self {
        Self::with_rng(config, width, height, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FrameEncoder<R> {
    pub fn with_rng(config: RenderConfig, width: usize, height: usize, rng: R) -> Self {
        let capacity = buffer_size(&config, width, height);
        log::info!(
            "frame encoder {}x{} charset={} color={} gradient={} capacity={} bytes",
            width,
            height,
            config.character_set,
            config.color_enabled,
            config.gradient_enabled,
            capacity
        );
        Self {
            config,
            width,
            height,
            buffer: Vec::with_capacity(capacity),
            capacity,
            has_rendered_first_frame: false,
            rng,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Framebuffer dimensions as (width, height).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Precomputed output capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn has_rendered_first_frame(&self) -> bool {
        self.has_rendered_first_frame
    }

    /// Encode one frame.
    ///
    /// With gamma correction on, pixels are corrected in place before use.
    /// The first call also returns the screen-clear prelude.
    ///
    /// # Errors
    /// Returns `FramebufferSize` if `framebuffer` is not exactly width x height.
    pub fn encode(&mut self, framebuffer: &mut [u32]) -> Result<EncodedFrame<'_>, BackendError> {
        let expected = self.width * self.height;
        if framebuffer.len() != expected {
            return Err(BackendError::FramebufferSize {
                expected,
                actual: framebuffer.len(),
            });
        }

        let prelude: &'static [u8] = if self.has_rendered_first_frame {
            &[]
        } else {
            self.has_rendered_first_frame = true;
            CLEAR_SCREEN
        };

        let config = self.config;
        let buf = &mut self.buffer;
        buf.clear();

        buf.extend_from_slice(CURSOR_HOME);
        if config.erase_enabled {
            buf.extend_from_slice(ERASE_DISPLAY);
        }
        if config.bold_enabled {
            buf.extend_from_slice(BOLD);
        }

        // Each frame starts with no color emitted.
        let mut last_color: Option<u32> = None;

        for row in 0..self.height {
            let line = &mut framebuffer[row * self.width..(row + 1) * self.width];
            for slot in line.iter_mut() {
                if config.gamma_correct_enabled {
                    *slot = gamma_correct_pixel(*slot);
                }
                let pixel = Pixel::from(*slot);

                if config.color_enabled && last_color != Some(pixel.rgb24()) {
                    sgr::push_true_color(buf, pixel.r, pixel.g, pixel.b);
                    last_color = Some(pixel.rgb24());
                }

                push_glyph_pair(buf, &mut self.rng, &config, pixel.channel_sum());
            }
            buf.push(b'\n');
        }

        if config.color_enabled || config.bold_enabled {
            buf.extend_from_slice(RESET);
        }

        debug_assert!(
            buf.len() <= self.capacity,
            "frame overran its buffer: {} > {}",
            buf.len(),
            self.capacity
        );

        Ok(EncodedFrame {
            prelude,
            body: &self.buffer,
        })
    }
}

/// Append the two glyphs drawn for one pixel.
fn push_glyph_pair<R: Rng>(buf: &mut Vec<u8>, rng: &mut R, config: &RenderConfig, sum: u32) {
    match (config.character_set, config.gradient_enabled) {
        (CharacterSet::Ascii, true) => {
            let glyph = gradient::ascii_glyph(sum);
            buf.push(glyph);
            buf.push(glyph);
        }
        (CharacterSet::Ascii, false) => buf.extend_from_slice(ASCII_SOLID),
        (CharacterSet::Block, true) => match gradient::block_glyph(sum) {
            Some(glyph) => {
                buf.extend_from_slice(glyph.as_bytes());
                buf.extend_from_slice(glyph.as_bytes());
            }
            None => buf.extend_from_slice(EMPTY_PAIR),
        },
        (CharacterSet::Block, false) => {
            buf.extend_from_slice(FULL_BLOCK.as_bytes());
            buf.extend_from_slice(FULL_BLOCK.as_bytes());
        }
        (CharacterSet::Braille, true) => match gradient::braille_glyphs(sum) {
            Some(choices) => {
                // Dither: each half of the cell picks independently.
                buf.extend_from_slice(&choices[rng.gen_range(0..choices.len())]);
                buf.extend_from_slice(&choices[rng.gen_range(0..choices.len())]);
            }
            None => buf.extend_from_slice(EMPTY_PAIR),
        },
        (CharacterSet::Braille, false) => {
            buf.extend_from_slice(&FULL_BRAILLE);
            buf.extend_from_slice(&FULL_BRAILLE);
        }
    }
}
