use super::Vec2;

/// Render target size in pixels.
///
/// The rasterizer maps NDC `[-1, 1]²` onto `[0, width] × [0, height]`, flipping
/// Y so that NDC +Y points toward row 0.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Maps normalized device coordinates to screen pixels.
    #[inline]
    pub fn ndc_to_screen(self, x: f32, y: f32) -> Vec2 {
        Vec2::new((x + 1.0) * 0.5 * self.width, (1.0 - y) * 0.5 * self.height)
    }
}
