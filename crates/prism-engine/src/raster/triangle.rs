use crate::coords::{Vec2, Viewport};
use crate::paint::Color;
use crate::stage::VertexOutput;

use super::interpolate::{edge, interpolate_color, interpolate_depth, Barycentric};

/// A covered pixel with its interpolated varyings.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fragment {
    pub x: u32,
    pub y: u32,
    /// Interpolated `z / w`.
    pub depth: f32,
    pub color: Color,
}

/// Result of rasterizing one triangle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Coverage {
    /// Number of fragments emitted (may be zero for sliver triangles).
    Covered(u32),
    /// Zero screen-space area.
    Degenerate,
    /// A vertex has `w <= 0` or a non-finite coordinate, or the viewport is
    /// empty. Such triangles need clipping, which this rasterizer does not
    /// perform.
    Rejected,
}

/// Edge `a → b` owns the pixel centers lying exactly on it.
///
/// Vertices are in clockwise order on screen (+Y down). A top edge is
/// horizontal with the interior below; a left edge runs upward.
#[inline]
fn is_top_left(a: Vec2, b: Vec2) -> bool {
    let d = b - a;
    (d.y == 0.0 && d.x > 0.0) || d.y < 0.0
}

#[inline]
fn covers(w: f32, top_left: bool) -> bool {
    w > 0.0 || (w == 0.0 && top_left)
}

fn to_screen(viewport: Viewport, v: &VertexOutput) -> Option<Vec2> {
    let c = v.clip;
    if !c.is_finite() || c.w <= 0.0 {
        return None;
    }
    let p = viewport.ndc_to_screen(c.x / c.w, c.y / c.w);
    p.is_finite().then_some(p)
}

/// Rasterizes one triangle, calling `emit` for every covered pixel center.
///
/// Coverage uses the top-left fill rule, so triangles sharing an edge never
/// both claim a pixel on it. Either winding is accepted.
pub fn rasterize_triangle(
    viewport: Viewport,
    tri: [&VertexOutput; 3],
    mut emit: impl FnMut(Fragment),
) -> Coverage {
    if !viewport.is_valid() {
        return Coverage::Rejected;
    }
    let (Some(s0), Some(s1), Some(s2)) = (
        to_screen(viewport, tri[0]),
        to_screen(viewport, tri[1]),
        to_screen(viewport, tri[2]),
    ) else {
        return Coverage::Rejected;
    };

    // Normalize to clockwise; keep each screen point paired with its output.
    let area = edge(s0, s1, s2);
    if area == 0.0 {
        return Coverage::Degenerate;
    }
    let (p, t) = if area > 0.0 {
        ([s0, s1, s2], tri)
    } else {
        ([s0, s2, s1], [tri[0], tri[2], tri[1]])
    };
    let area = area.abs();

    let tl = [is_top_left(p[1], p[2]), is_top_left(p[2], p[0]), is_top_left(p[0], p[1])];

    let lo = p[0].min(p[1]).min(p[2]);
    let hi = p[0].max(p[1]).max(p[2]);
    let x0 = lo.x.floor().max(0.0) as u32;
    let y0 = lo.y.floor().max(0.0) as u32;
    let x1 = hi.x.ceil().min(viewport.width) as u32;
    let y1 = hi.y.ceil().min(viewport.height) as u32;

    let mut count = 0u32;
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(p[1], p[2], center);
            let w1 = edge(p[2], p[0], center);
            let w2 = edge(p[0], p[1], center);
            if !(covers(w0, tl[0]) && covers(w1, tl[1]) && covers(w2, tl[2])) {
                continue;
            }

            let bary = Barycentric::new(w0 / area, w1 / area, w2 / area);
            emit(Fragment {
                x,
                y,
                depth: interpolate_depth(bary, t),
                color: interpolate_color(bary, t),
            });
            count += 1;
        }
    }
    Coverage::Covered(count)
}
