//! Gradient tables: brightness bucket to glyph lookup for each character set.
//!
//! Brightness is the plain channel sum `r + g + b` (0..=765). Buckets are
//! computed as `sum * levels / 776`. The divisor is slightly larger than the
//! maximum sum, so the top bucket is narrower than the others and the value
//! `levels` itself is never produced.

use std::sync::OnceLock;

/// Divisor shared by all gradient bucket computations.
pub const GRADIENT_DIVISOR: u32 = 776;

/// ASCII density ramp, darkest first.
pub const ASCII_GRADIENT: &[u8] =
    b" .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Glyph drawn for every pixel when the ASCII gradient is disabled.
pub const ASCII_SOLID: &[u8; 2] = b"##";

/// Block bucket count: empty plus four shades.
pub const BLOCK_LEVELS: u32 = 5;

/// Shade glyphs for block buckets 1..=4.
pub const BLOCK_GLYPHS: [&str; 4] = ["\u{2591}", "\u{2592}", "\u{2593}", "\u{2588}"];

/// Full block, drawn when the block gradient is disabled.
pub const FULL_BLOCK: &str = "\u{2588}";

/// Braille bucket count multiplier.
pub const BRAILLE_LEVELS: u32 = 8;

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: u32 = 0x2800;

/// All eight dots raised (U+28FF).
pub const FULL_BRAILLE: [u8; 3] = braille_utf8(0xFF);

/// Two blanks, drawn for bucket 0 of block and braille.
pub const EMPTY_PAIR: &[u8; 2] = b"  ";

/// Gradient bucket for a channel sum.
#[inline]
pub fn bucket(sum: u32, levels: u32) -> usize {
    (sum * levels / GRADIENT_DIVISOR) as usize
}

/// ASCII ramp glyph for a channel sum.
#[inline]
pub fn ascii_glyph(sum: u32) -> u8 {
    ASCII_GRADIENT[bucket(sum, ASCII_GRADIENT.len() as u32)]
}

/// Block glyph for a channel sum, or `None` for the empty bucket.
#[inline]
pub fn block_glyph(sum: u32) -> Option<&'static str> {
    match bucket(sum, BLOCK_LEVELS) {
        0 => None,
        b => Some(BLOCK_GLYPHS[b - 1]),
    }
}

/// Equivalent braille glyphs for a channel sum, or `None` for the empty bucket.
///
/// Bucket `k` uses every pattern with `k + 1` raised dots, so the brightest
/// bucket is the single full pattern and dimmer buckets offer many
/// interchangeable glyphs to dither between.
pub fn braille_glyphs(sum: u32) -> Option<&'static [[u8; 3]]> {
    match bucket(sum, BRAILLE_LEVELS) {
        0 => None,
        b => Some(braille_by_dots()[b + 1].as_slice()),
    }
}

/// UTF-8 encoding of the braille pattern with the given dot bits.
pub const fn braille_utf8(dots: u8) -> [u8; 3] {
    let cp = BRAILLE_BASE + dots as u32;
    [
        0xE0 | (cp >> 12) as u8,
        0x80 | ((cp >> 6) & 0x3F) as u8,
        0x80 | (cp & 0x3F) as u8,
    ]
}

/// Braille patterns grouped by number of raised dots (index 0..=8).
fn braille_by_dots() -> &'static [Vec<[u8; 3]>; 9] {
    static TABLE: OnceLock<[Vec<[u8; 3]>; 9]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut groups: [Vec<[u8; 3]>; 9] = Default::default();
        for dots in 0..=255u8 {
            groups[dots.count_ones() as usize].push(braille_utf8(dots));
        }
        groups
    })
}
