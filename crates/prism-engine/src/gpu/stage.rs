use crate::pipeline::{BoundBuffer, Pipeline};
use crate::raster::Topology;
use crate::stage::VertexStage;

use super::{passthrough_wgsl, GpuVertexLayout, RenderCtx, RenderTarget};

/// GPU counterpart of a CPU [`Pipeline`] running the passthrough stage.
///
/// The render pipeline is created lazily and rebuilt when the target format
/// changes. The vertex buffer grows to the largest draw seen.
pub struct GpuStage {
    layout: GpuVertexLayout,
    shader_src: String,
    topology: Topology,

    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    vbo: Option<wgpu::Buffer>,
    vbo_capacity: wgpu::BufferAddress,
}

impl GpuStage {
    pub fn new<S: VertexStage>(pipeline: &Pipeline<S>, topology: Topology) -> Self {
        Self {
            layout: GpuVertexLayout::from_layout(pipeline.layout()),
            shader_src: passthrough_wgsl(pipeline.layout()),
            topology,
            pipeline_format: None,
            pipeline: None,
            vbo: None,
            vbo_capacity: 0,
        }
    }

    #[inline]
    pub fn shader_source(&self) -> &str {
        &self.shader_src
    }

    /// Uploads `buffer` and draws all of its vertices into `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        buffer: &BoundBuffer<'_>,
    ) {
        if buffer.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_vertex_capacity(ctx, buffer.bytes().len() as wgpu::BufferAddress);

        let Some(vbo) = self.vbo.as_ref() else { return };
        ctx.queue.write_buffer(vbo, 0, buffer.bytes());

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let load = target.load_op();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism vertex stage pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..buffer.bytes().len() as wgpu::BufferAddress));
        rpass.draw(0..buffer.len() as u32, 0..1);
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.target_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism passthrough shader"),
            source: wgpu::ShaderSource::Wgsl(self.shader_src.as_str().into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("prism pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism passthrough pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[self.layout.as_wgpu()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: self.topology.to_wgpu(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::debug!("prism passthrough pipeline created for {:?}", ctx.target_format);

        self.pipeline_format = Some(ctx.target_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: wgpu::BufferAddress) {
        if required <= self.vbo_capacity && self.vbo.is_some() {
            return;
        }

        let capacity = required.next_power_of_two().max(1024);
        self.vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism vertex buffer"),
            size: capacity,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vbo_capacity = capacity;
    }
}
