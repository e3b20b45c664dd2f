use crate::coords::Vec2;
use crate::paint::Color;
use crate::stage::VertexOutput;

/// Barycentric weights of a point with respect to a triangle.
///
/// `l0 + l1 + l2 == 1` up to rounding. At a vertex the weights are exactly
/// `1` for that vertex and `0` for the other two.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Barycentric {
    pub l0: f32,
    pub l1: f32,
    pub l2: f32,
}

impl Barycentric {
    #[inline]
    pub const fn new(l0: f32, l1: f32, l2: f32) -> Self {
        Self { l0, l1, l2 }
    }

    /// Weights that select vertex `i` alone.
    #[inline]
    pub const fn vertex(i: usize) -> Self {
        match i {
            0 => Self::new(1.0, 0.0, 0.0),
            1 => Self::new(0.0, 1.0, 0.0),
            _ => Self::new(0.0, 0.0, 1.0),
        }
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.l0, self.l1, self.l2]
    }

    /// Computes weights of `p` in triangle `(a, b, c)`.
    ///
    /// Returns `None` for a degenerate (zero-area) triangle.
    pub fn of_point(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        let area = edge(a, b, c);
        if area == 0.0 || !area.is_finite() {
            return None;
        }
        Some(Self::new(edge(b, c, p) / area, edge(c, a, p) / area, edge(a, b, p) / area))
    }

    /// The vertex whose weight is the only non-zero one, if any.
    ///
    /// Interpolation returns that vertex's attribute verbatim instead of
    /// recomputing it through rounding arithmetic.
    #[inline]
    pub fn sole_vertex(self) -> Option<usize> {
        match (self.l0 == 0.0, self.l1 == 0.0, self.l2 == 0.0) {
            (false, true, true) => Some(0),
            (true, false, true) => Some(1),
            (true, true, false) => Some(2),
            _ => None,
        }
    }
}

/// Edge function: twice the signed area of `(a, b, p)`.
///
/// Positive when `p` lies clockwise of `a → b` in a +Y-down space.
#[inline]
pub(crate) fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b - a).cross(p - a)
}

/// Interpolates the color varying of a triangle.
///
/// Weights are screen-space barycentrics; they are corrected by each vertex's
/// `1/w` so that the result is linear in clip space. With `w = 1` everywhere
/// this reduces to plain linear interpolation.
pub fn interpolate_color(bary: Barycentric, tri: [&VertexOutput; 3]) -> Color {
    if let Some(i) = bary.sole_vertex() {
        return tri[i].color.color();
    }

    let colors = [tri[0].color.color(), tri[1].color.color(), tri[2].color.color()];
    let weights = perspective_weights(bary, tri);
    Color::weighted(colors, weights)
}

/// Interpolates `z / w` for depth output. Depth is affine in screen space, so
/// no perspective correction applies.
pub fn interpolate_depth(bary: Barycentric, tri: [&VertexOutput; 3]) -> f32 {
    if let Some(i) = bary.sole_vertex() {
        return tri[i].clip.z / tri[i].clip.w;
    }
    let [l0, l1, l2] = bary.to_array();
    let depth = |v: &VertexOutput| v.clip.z / v.clip.w;
    l0 * depth(tri[0]) + l1 * depth(tri[1]) + l2 * depth(tri[2])
}

/// Perspective-corrected, normalized weights.
fn perspective_weights(bary: Barycentric, tri: [&VertexOutput; 3]) -> [f32; 3] {
    let mut w = [0.0f32; 3];
    for (i, (l, v)) in bary.to_array().into_iter().zip(tri).enumerate() {
        w[i] = l / v.clip.w;
    }
    let sum = w[0] + w[1] + w[2];
    if sum == 0.0 || !sum.is_finite() {
        return bary.to_array();
    }
    [w[0] / sum, w[1] / sum, w[2] / sum]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::{ClipPosition, VaryingColor};

    const EPS: f32 = 1e-6;

    fn out(x: f32, y: f32, w: f32, c: [f32; 4]) -> VertexOutput {
        VertexOutput::new(ClipPosition::new(x, y, 0.0, w), VaryingColor::from_array(c))
    }

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < EPS
            && (a.g - b.g).abs() < EPS
            && (a.b - b.b).abs() < EPS
            && (a.a - b.a).abs() < EPS
    }

    // ── barycentric ───────────────────────────────────────────────────────

    #[test]
    fn weights_at_vertices_are_exact() {
        let (a, b, c) = (Vec2::new(0.3, 0.7), Vec2::new(11.1, 1.9), Vec2::new(4.2, 9.6));
        assert_eq!(Barycentric::of_point(a, a, b, c).unwrap().sole_vertex(), Some(0));
        assert_eq!(Barycentric::of_point(b, a, b, c).unwrap().sole_vertex(), Some(1));
        assert_eq!(Barycentric::of_point(c, a, b, c).unwrap().sole_vertex(), Some(2));
    }

    #[test]
    fn weights_sum_to_one_inside() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        let w = Barycentric::of_point(Vec2::new(2.5, 3.5), a, b, c).unwrap();
        assert!((w.l0 + w.l1 + w.l2 - 1.0).abs() < EPS);
        assert!((w.l1 - 0.25).abs() < EPS);
        assert!((w.l2 - 0.35).abs() < EPS);
    }

    #[test]
    fn degenerate_triangle_has_no_weights() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(1.0, 1.0);
        let c = Vec2::new(2.0, 2.0);
        assert!(Barycentric::of_point(Vec2::new(0.5, 0.5), a, b, c).is_none());
    }

    // ── color interpolation ───────────────────────────────────────────────

    #[test]
    fn color_at_each_vertex_is_that_vertex_color() {
        let v0 = out(-1.0, -1.0, 1.0, [0.2, 0.4, 0.6, 1.0]);
        let v1 = out(1.0, -1.0, 1.0, [0.9, 0.1, 0.3, 0.5]);
        let v2 = out(-1.0, 1.0, 1.0, [0.33, 0.66, 0.99, 0.123]);
        let tri = [&v0, &v1, &v2];
        for i in 0..3 {
            let c = interpolate_color(Barycentric::vertex(i), tri);
            assert_eq!(c, tri[i].color.color());
        }
    }

    #[test]
    fn midpoint_between_black_and_white_is_half() {
        let v0 = out(0.0, 0.0, 1.0, [0.0, 0.0, 0.0, 0.0]);
        let v1 = out(1.0, 0.0, 1.0, [1.0, 1.0, 1.0, 1.0]);
        let v2 = out(0.0, 1.0, 1.0, [0.3, 0.3, 0.3, 0.3]);
        let c = interpolate_color(Barycentric::new(0.5, 0.5, 0.0), [&v0, &v1, &v2]);
        assert!(approx(c, Color::new(0.5, 0.5, 0.5, 0.5)), "{c:?}");
    }

    #[test]
    fn unit_w_is_plain_linear_interpolation() {
        let v0 = out(0.0, 0.0, 1.0, [1.0, 0.0, 0.0, 1.0]);
        let v1 = out(1.0, 0.0, 1.0, [0.0, 1.0, 0.0, 1.0]);
        let v2 = out(0.0, 1.0, 1.0, [0.0, 0.0, 1.0, 1.0]);
        let c = interpolate_color(Barycentric::new(0.2, 0.3, 0.5), [&v0, &v1, &v2]);
        assert!(approx(c, Color::new(0.2, 0.3, 0.5, 1.0)), "{c:?}");
    }

    #[test]
    fn perspective_correction_favors_near_vertex() {
        // v0 is twice as close (w = 1) as v1 (w = 2): the screen-space midpoint
        // sits at clip-space parameter 1/3 from v0.
        let v0 = out(0.0, 0.0, 1.0, [0.0, 0.0, 0.0, 0.0]);
        let v1 = out(2.0, 0.0, 2.0, [1.0, 1.0, 1.0, 1.0]);
        let v2 = out(0.0, 1.0, 1.0, [0.0, 0.0, 0.0, 0.0]);
        let c = interpolate_color(Barycentric::new(0.5, 0.5, 0.0), [&v0, &v1, &v2]);
        assert!((c.r - 1.0 / 3.0).abs() < EPS, "{c:?}");
    }

    #[test]
    fn depth_is_z_over_w() {
        let mut v0 = out(0.0, 0.0, 2.0, [0.0; 4]);
        v0.clip.z = 1.0;
        let v1 = out(1.0, 0.0, 1.0, [0.0; 4]);
        let v2 = out(0.0, 1.0, 1.0, [0.0; 4]);
        assert_eq!(interpolate_depth(Barycentric::vertex(0), [&v0, &v1, &v2]), 0.5);
        let d = interpolate_depth(Barycentric::new(0.5, 0.5, 0.0), [&v0, &v1, &v2]);
        assert!((d - 0.25).abs() < EPS);
    }
}
