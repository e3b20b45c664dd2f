//! Per-vertex input record.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// One vertex as supplied by the vertex buffer owner.
///
/// `#[repr(C)]` with no padding: a `&[Vertex]` is the canonical interleaved
/// buffer (28-byte stride, position at byte 0, color at byte 12), matching
/// [`InputLayout::interleaved`](crate::layout::InputLayout::interleaved).
///
/// Color is straight alpha, channels conventionally in [0, 1].
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const SIZE: usize = std::mem::size_of::<Vertex>();

    #[inline]
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }

    /// Reinterprets a vertex slice as interleaved bytes.
    #[inline]
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
