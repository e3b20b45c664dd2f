//! The vertex stage: one pure function call per vertex.
//!
//! A stage turns an input [`Vertex`] into a [`VertexOutput`]: a clip-space
//! position for the rasterizer and a color varying for interpolation. Stages
//! hold no per-invocation state, so a driver may call them from any number of
//! threads in any order.

mod passthrough;

use crate::paint::Color;
use crate::pipeline::PrecisionHint;
use crate::vertex::Vertex;

pub use passthrough::PassthroughStage;

/// Homogeneous clip-space position. Always carried at full `f32` precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl ClipPosition {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Lifts a 3-component position with `w = 1.0`.
    #[inline]
    pub const fn from_position(p: [f32; 3]) -> Self {
        Self::new(p[0], p[1], p[2], 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

/// Per-vertex color output, interpolated across the primitive.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct VaryingColor(pub Color);

impl VaryingColor {
    /// Interpolated colors only affect visual fidelity, so the output
    /// interface accepts reduced-precision storage for this varying.
    pub const PRECISION: PrecisionHint = PrecisionHint::Reduced;

    #[inline]
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self(Color::from_array(c))
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.0
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        self.0.to_array()
    }
}

/// Everything a stage produces for one vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexOutput {
    pub clip: ClipPosition,
    pub color: VaryingColor,
}

impl VertexOutput {
    #[inline]
    pub const fn new(clip: ClipPosition, color: VaryingColor) -> Self {
        Self { clip, color }
    }
}

/// Per-vertex callback invoked by the pipeline driver.
///
/// Implementations must be pure: the output may depend only on `vertex` and
/// on immutable state captured at construction.
pub trait VertexStage: Sync {
    fn process(&self, vertex: &Vertex) -> VertexOutput;
}

impl<S: VertexStage + ?Sized> VertexStage for &S {
    #[inline]
    fn process(&self, vertex: &Vertex) -> VertexOutput {
        (**self).process(vertex)
    }
}

/// Adapts a closure into a [`VertexStage`].
#[derive(Debug, Clone, Copy)]
pub struct FnStage<F>(pub F);

impl<F> VertexStage for FnStage<F>
where
    F: Fn(&Vertex) -> VertexOutput + Sync,
{
    #[inline]
    fn process(&self, vertex: &Vertex) -> VertexOutput {
        (self.0)(vertex)
    }
}

/// Wraps `f` as a stage.
#[inline]
pub fn from_fn<F>(f: F) -> FnStage<F>
where
    F: Fn(&Vertex) -> VertexOutput + Sync,
{
    FnStage(f)
}
