/// Device handles a GPU stage renders with.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub target_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            target_format,
        }
    }
}

/// Where a draw lands: an encoder to record into and the color view to render to.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
    /// `Some` clears the target before drawing; `None` loads existing contents.
    pub clear: Option<wgpu::Color>,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self {
            encoder,
            color_view,
            clear: None,
        }
    }

    #[inline]
    pub fn with_clear(mut self, color: wgpu::Color) -> Self {
        self.clear = Some(color);
        self
    }

    pub(super) fn load_op(&self) -> wgpu::LoadOp<wgpu::Color> {
        match self.clear {
            Some(c) => wgpu::LoadOp::Clear(c),
            None => wgpu::LoadOp::Load,
        }
    }
}
