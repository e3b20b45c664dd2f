use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar type of an attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScalarKind {
    Float,
    Uint,
    /// Unsigned normalized integer, read by the GPU as a float in [0, 1].
    Unorm,
}

/// Data format of a single vertex attribute, named after the wgpu formats.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeFormat {
    Float32,
    Float32x2,
    Float32x3,
    Float32x4,
    Uint32,
    Unorm8x4,
}

impl AttributeFormat {
    #[inline]
    pub const fn components(self) -> u32 {
        match self {
            AttributeFormat::Float32 | AttributeFormat::Uint32 => 1,
            AttributeFormat::Float32x2 => 2,
            AttributeFormat::Float32x3 => 3,
            AttributeFormat::Float32x4 | AttributeFormat::Unorm8x4 => 4,
        }
    }

    #[inline]
    pub const fn scalar(self) -> ScalarKind {
        match self {
            AttributeFormat::Float32
            | AttributeFormat::Float32x2
            | AttributeFormat::Float32x3
            | AttributeFormat::Float32x4 => ScalarKind::Float,
            AttributeFormat::Uint32 => ScalarKind::Uint,
            AttributeFormat::Unorm8x4 => ScalarKind::Unorm,
        }
    }

    /// Size in bytes.
    #[inline]
    pub const fn size(self) -> u32 {
        match self {
            AttributeFormat::Unorm8x4 => 4,
            f => f.components() * 4,
        }
    }

    #[inline]
    pub(crate) fn to_wgpu(self) -> wgpu::VertexFormat {
        match self {
            AttributeFormat::Float32 => wgpu::VertexFormat::Float32,
            AttributeFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
            AttributeFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
            AttributeFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
            AttributeFormat::Uint32 => wgpu::VertexFormat::Uint32,
            AttributeFormat::Unorm8x4 => wgpu::VertexFormat::Unorm8x4,
        }
    }
}

impl fmt::Display for AttributeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeFormat::Float32 => "float32",
            AttributeFormat::Float32x2 => "float32x2",
            AttributeFormat::Float32x3 => "float32x3",
            AttributeFormat::Float32x4 => "float32x4",
            AttributeFormat::Uint32 => "uint32",
            AttributeFormat::Unorm8x4 => "unorm8x4",
        };
        f.write_str(name)
    }
}
