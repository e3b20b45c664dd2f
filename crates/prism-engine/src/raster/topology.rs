use serde::{Deserialize, Serialize};

/// How consecutive vertices are grouped into triangles.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Every three vertices form an independent triangle.
    #[default]
    TriangleList,
    /// Each vertex after the second forms a triangle with the previous two.
    /// Odd triangles swap their first two vertices to keep a consistent winding.
    TriangleStrip,
}

impl Topology {
    /// Vertex indices of each assembled triangle. Trailing vertices that do
    /// not complete a triangle are dropped.
    pub fn triangles(self, vertex_count: usize) -> impl Iterator<Item = [usize; 3]> {
        let count = match self {
            Topology::TriangleList => vertex_count / 3,
            Topology::TriangleStrip => vertex_count.saturating_sub(2),
        };
        (0..count).map(move |i| match self {
            Topology::TriangleList => [3 * i, 3 * i + 1, 3 * i + 2],
            Topology::TriangleStrip if i % 2 == 0 => [i, i + 1, i + 2],
            Topology::TriangleStrip => [i + 1, i, i + 2],
        })
    }

    /// Vertices left over after assembly.
    #[inline]
    pub fn leftover(self, vertex_count: usize) -> usize {
        match self {
            Topology::TriangleList => vertex_count % 3,
            Topology::TriangleStrip if vertex_count < 3 => vertex_count,
            Topology::TriangleStrip => 0,
        }
    }

    #[inline]
    pub(crate) fn to_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            Topology::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
        }
    }
}
