use crate::layout::ResolvedLayout;

/// Owned wgpu attribute list for one vertex buffer.
///
/// `wgpu::VertexBufferLayout` borrows its attributes, so this type keeps them
/// alive for as long as pipeline descriptors need them.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuVertexLayout {
    array_stride: wgpu::BufferAddress,
    attributes: Vec<wgpu::VertexAttribute>,
}

impl GpuVertexLayout {
    pub fn from_layout(layout: &ResolvedLayout) -> Self {
        let attributes = [layout.position(), layout.color()]
            .into_iter()
            .map(|a| wgpu::VertexAttribute {
                format: a.format.to_wgpu(),
                offset: a.offset as wgpu::BufferAddress,
                shader_location: a.location,
            })
            .collect();
        Self {
            array_stride: layout.stride() as wgpu::BufferAddress,
            attributes,
        }
    }

    #[inline]
    pub fn attributes(&self) -> &[wgpu::VertexAttribute] {
        &self.attributes
    }

    pub fn as_wgpu(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &self.attributes,
        }
    }
}
