use crate::vertex::Vertex;

use super::{ClipPosition, VaryingColor, VertexOutput, VertexStage};

/// Identity vertex stage.
///
/// - clip position = `(x, y, z, 1.0)`, no matrix, no divide
/// - varying color = input color, bit for bit (no clamping)
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PassthroughStage;

impl VertexStage for PassthroughStage {
    #[inline]
    fn process(&self, vertex: &Vertex) -> VertexOutput {
        VertexOutput {
            clip: ClipPosition::from_position(vertex.position),
            color: VaryingColor::from_array(vertex.color),
        }
    }
}
