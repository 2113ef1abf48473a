//! Animated color test pattern for the demo host.

use termframe::render::Pixel;

/// Horizontal red ramp, vertical green ramp and a diagonal blue band that
/// scrolls with time.
pub struct TestPattern {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl TestPattern {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Fill the framebuffer for time `t_ms` and return it.
    pub fn render(&mut self, t_ms: u64) -> &mut [u32] {
        let shift = (t_ms / 16) as usize;
        let w = self.width.max(1);
        let h = self.height.max(1);

        for (i, slot) in self.pixels.iter_mut().enumerate() {
            let (x, y) = (i % w, i / w);
            let r = (x * 255 / w) as u8;
            let g = (y * 255 / h) as u8;
            let b = ((x + y) * 4 + shift) as u8;
            *slot = Pixel::rgb(r, g, b).into();
        }
        &mut self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_fills_framebuffer() {
        let mut pattern = TestPattern::new(80, 50);
        assert_eq!(pattern.render(0).len(), 4000);
    }

    #[test]
    fn test_pattern_ramps() {
        let mut pattern = TestPattern::new(4, 2);
        let fb = pattern.render(0).to_vec();
        assert_eq!(Pixel::from(fb[0]).r, 0);
        assert_eq!(Pixel::from(fb[3]).r, 191);
        assert_eq!(Pixel::from(fb[4]).g, 127);
    }

    #[test]
    fn test_pattern_scrolls() {
        let mut pattern = TestPattern::new(2, 2);
        let first = pattern.render(0).to_vec();
        let later = pattern.render(160).to_vec();
        assert_ne!(first, later);
        assert_eq!(Pixel::from(later[0]).b, 10);
    }
}
