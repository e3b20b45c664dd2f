use serde::{Deserialize, Serialize};

/// Linear straight-alpha RGBA color.
///
/// Channels are conventionally in [0, 1] but are never clamped here: the
/// vertex stage forwards colors bit-for-bit, and only framebuffer export
/// quantizes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Linear blend from `self` (t = 0) to `other` (t = 1).
    ///
    /// The endpoints are returned exactly.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Color {
        if t == 0.0 {
            return self;
        }
        if t == 1.0 {
            return other;
        }
        let s = 1.0 - t;
        Color::new(
            self.r * s + other.r * t,
            self.g * s + other.g * t,
            self.b * s + other.b * t,
            self.a * s + other.a * t,
        )
    }

    /// Weighted sum `Σ wᵢ·cᵢ`. Weights are not normalized.
    #[inline]
    pub(crate) fn weighted(colors: [Color; 3], weights: [f32; 3]) -> Color {
        let mut out = Color::transparent();
        for (c, w) in colors.iter().zip(weights) {
            out.r += c.r * w;
            out.g += c.g * w;
            out.b += c.b * w;
            out.a += c.a * w;
        }
        out
    }

    /// Quantizes to 8-bit straight RGBA, clamping out-of-range channels.
    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        fn q(v: f32) -> u8 {
            if v.is_nan() {
                return 0;
            }
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl From<[f32; 4]> for Color {
    #[inline]
    fn from(c: [f32; 4]) -> Self {
        Color::from_array(c)
    }
}

impl From<Color> for [f32; 4] {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── lerp ──────────────────────────────────────────────────────────────

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::new(0.2, 0.4, 0.6, 1.0);
        let b = Color::new(0.1, 0.3, 0.7, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_of_black_and_white() {
        let m = Color::transparent().lerp(Color::white(), 0.5);
        assert_eq!(m, Color::new(0.5, 0.5, 0.5, 0.5));
    }

    // ── quantization ──────────────────────────────────────────────────────

    #[test]
    fn to_rgba8_rounds_and_clamps() {
        assert_eq!(Color::new(0.5, 1.5, -0.2, 1.0).to_rgba8(), [128, 255, 0, 255]);
    }

    #[test]
    fn to_rgba8_maps_nan_to_zero() {
        assert_eq!(Color::new(f32::NAN, 0.0, 0.0, 1.0).to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn is_finite_detects_infinity() {
        assert!(Color::white().is_finite());
        assert!(!Color::new(f32::INFINITY, 0.0, 0.0, 1.0).is_finite());
    }
}
