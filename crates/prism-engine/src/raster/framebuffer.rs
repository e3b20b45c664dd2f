use crate::coords::Viewport;
use crate::paint::Color;

use super::Fragment;

/// Row-major RGBA color target, row 0 at the top.
///
/// Writes replace the stored color; there is no blending or depth test.
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, clear: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![clear; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Stores a fragment's color. Fragments outside the target are ignored.
    #[inline]
    pub fn write(&mut self, fragment: &Fragment) {
        if let Some(i) = self.index(fragment.x, fragment.y) {
            self.pixels[i] = fragment.color;
        }
    }

    /// Quantized straight-alpha RGBA8, row-major, suitable for image export.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_rgba8()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(x: u32, y: u32, color: Color) -> Fragment {
        Fragment { x, y, depth: 0.0, color }
    }

    #[test]
    fn new_is_filled_with_clear_color() {
        let fb = Framebuffer::new(3, 2, Color::black());
        assert_eq!(fb.pixels().len(), 6);
        assert!(fb.pixels().iter().all(|&c| c == Color::black()));
    }

    #[test]
    fn write_replaces_without_blending() {
        let mut fb = Framebuffer::new(2, 2, Color::white());
        let c = Color::new(1.0, 0.0, 0.0, 0.5);
        fb.write(&frag(1, 0, c));
        assert_eq!(fb.get(1, 0), Some(c));
        assert_eq!(fb.get(0, 0), Some(Color::white()));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = Framebuffer::new(2, 2, Color::black());
        fb.write(&frag(2, 0, Color::white()));
        assert_eq!(fb.get(2, 0), None);
        assert!(fb.pixels().iter().all(|&c| c == Color::black()));
    }

    #[test]
    fn rgba8_export_is_row_major() {
        let mut fb = Framebuffer::new(2, 1, Color::transparent());
        fb.write(&frag(1, 0, Color::white()));
        assert_eq!(fb.to_rgba8(), vec![0, 0, 0, 0, 255, 255, 255, 255]);
    }
}
