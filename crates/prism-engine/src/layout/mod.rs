//! Vertex input layout: which bytes of a vertex buffer feed which stage input.
//!
//! A layout is plain data until [`InputLayout::validate`] turns it into a
//! [`ResolvedLayout`]. Every mismatch between the layout and what the vertex
//! stage consumes (three float position components, four float color
//! components) is reported there, once, as a [`PipelineError`].

mod format;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::vertex::Vertex;

pub use format::{AttributeFormat, ScalarKind};

/// What a vertex attribute means to the stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semantic {
    Position,
    Color,
}

impl Semantic {
    pub const ALL: [Semantic; 2] = [Semantic::Position, Semantic::Color];

    /// The one format the stage accepts for this input.
    #[inline]
    pub const fn expected_format(self) -> AttributeFormat {
        match self {
            Semantic::Position => AttributeFormat::Float32x3,
            Semantic::Color => AttributeFormat::Float32x4,
        }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semantic::Position => f.write_str("position"),
            Semantic::Color => f.write_str("color"),
        }
    }
}

/// One attribute inside a vertex record.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct VertexAttribute {
    pub semantic: Semantic,
    /// Shader input slot.
    pub location: u32,
    pub format: AttributeFormat,
    /// Byte offset from the start of the vertex record.
    pub offset: u32,
}

impl VertexAttribute {
    #[inline]
    pub const fn new(
        semantic: Semantic,
        location: u32,
        format: AttributeFormat,
        offset: u32,
    ) -> Self {
        Self { semantic, location, format, offset }
    }

    /// One past the last byte of the attribute. Widened so that offsets near
    /// `u32::MAX` cannot wrap.
    #[inline]
    pub const fn end(&self) -> u64 {
        self.offset as u64 + self.format.size() as u64
    }
}

/// Layout of one vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLayout {
    /// Bytes between consecutive vertex records.
    pub stride: u32,
    pub attributes: Vec<VertexAttribute>,
}

impl Default for InputLayout {
    fn default() -> Self {
        Self::interleaved()
    }
}

impl InputLayout {
    /// Position (location 0) followed by color (location 1), 28-byte stride.
    /// This is the memory layout of `[Vertex]`.
    pub fn interleaved() -> Self {
        Self {
            stride: Vertex::SIZE as u32,
            attributes: vec![
                VertexAttribute::new(Semantic::Position, 0, AttributeFormat::Float32x3, 0),
                VertexAttribute::new(Semantic::Color, 1, AttributeFormat::Float32x4, 12),
            ],
        }
    }

    pub fn attribute(&self, semantic: Semantic) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }

    /// Checks the layout against the stage's inputs.
    pub fn validate(&self) -> Result<ResolvedLayout, PipelineError> {
        if self.stride == 0 {
            return Err(PipelineError::ZeroStride);
        }
        if self.stride % 4 != 0 {
            return Err(PipelineError::MisalignedStride { stride: self.stride });
        }

        for (i, attr) in self.attributes.iter().enumerate() {
            if attr.offset % 4 != 0 {
                return Err(PipelineError::MisalignedOffset {
                    semantic: attr.semantic,
                    offset: attr.offset,
                });
            }
            if attr.end() > u64::from(self.stride) {
                return Err(PipelineError::AttributeOutOfBounds {
                    semantic: attr.semantic,
                    end: attr.end(),
                    stride: self.stride,
                });
            }
            let earlier = &self.attributes[..i];
            if earlier.iter().any(|a| a.location == attr.location) {
                return Err(PipelineError::DuplicateLocation { location: attr.location });
            }
            if earlier.iter().any(|a| a.semantic == attr.semantic) {
                return Err(PipelineError::DuplicateAttribute(attr.semantic));
            }
        }

        let position = self.resolve(Semantic::Position)?;
        let color = self.resolve(Semantic::Color)?;

        Ok(ResolvedLayout {
            stride: self.stride,
            position,
            color,
        })
    }

    fn resolve(&self, semantic: Semantic) -> Result<VertexAttribute, PipelineError> {
        let attr = *self
            .attribute(semantic)
            .ok_or(PipelineError::MissingAttribute(semantic))?;
        let expected = semantic.expected_format();

        if attr.format.components() != expected.components() {
            return Err(PipelineError::ComponentMismatch {
                semantic,
                expected: expected.components(),
                found: attr.format.components(),
                format: attr.format,
            });
        }
        if attr.format.scalar() != expected.scalar() {
            return Err(PipelineError::ScalarMismatch { semantic, found: attr.format });
        }
        Ok(attr)
    }
}

/// A layout that passed validation. Fetching through it cannot fail on a
/// buffer whose length is a multiple of the stride.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResolvedLayout {
    stride: u32,
    position: VertexAttribute,
    color: VertexAttribute,
}

impl ResolvedLayout {
    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn position(&self) -> VertexAttribute {
        self.position
    }

    #[inline]
    pub fn color(&self) -> VertexAttribute {
        self.color
    }

    /// Number of whole vertex records in `len` bytes, or `None` when `len`
    /// leaves a partial record.
    #[inline]
    pub fn vertex_count(&self, len: usize) -> Option<usize> {
        let stride = self.stride as usize;
        (len % stride == 0).then_some(len / stride)
    }

    /// Reads vertex `index` from `bytes`.
    ///
    /// # Panics
    /// Panics if the record lies outside `bytes`. [`BoundBuffer`](crate::pipeline::BoundBuffer)
    /// checks the length once so that its callers never hit this.
    #[inline]
    pub fn fetch(&self, bytes: &[u8], index: usize) -> Vertex {
        let base = index * self.stride as usize;
        let p = base + self.position.offset as usize;
        let c = base + self.color.offset as usize;
        Vertex {
            position: bytemuck::pod_read_unaligned(&bytes[p..p + 12]),
            color: bytemuck::pod_read_unaligned(&bytes[c..c + 16]),
        }
    }

    /// Packs vertices into a buffer with this layout. Bytes not covered by an
    /// attribute are zero.
    pub fn encode(&self, vertices: &[Vertex]) -> Vec<u8> {
        let stride = self.stride as usize;
        let mut out = vec![0u8; vertices.len() * stride];
        for (record, v) in out.chunks_exact_mut(stride).zip(vertices) {
            let p = self.position.offset as usize;
            let c = self.color.offset as usize;
            record[p..p + 12].copy_from_slice(bytemuck::bytes_of(&v.position));
            record[c..c + 16].copy_from_slice(bytemuck::bytes_of(&v.color));
        }
        out
    }
}
