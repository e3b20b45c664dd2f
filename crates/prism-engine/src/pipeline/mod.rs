//! Pipeline assembly and the per-vertex driver.
//!
//! Build once, run many times:
//! - [`Pipeline::build`] validates a [`PipelineConfig`] against the stage's
//!   inputs and outputs. All configuration errors surface here.
//! - [`Pipeline::bind`] checks a vertex buffer's size against the layout, once
//!   per draw.
//! - [`Pipeline::process_buffer`] / [`Pipeline::draw`] invoke the stage once
//!   per vertex. These never fail.

mod config;

use rayon::prelude::*;

use crate::error::PipelineError;
use crate::layout::ResolvedLayout;
use crate::raster::{rasterize_triangle, Coverage, Framebuffer, Topology};
use crate::stage::{VertexOutput, VertexStage};
use crate::vertex::Vertex;

pub use config::{load_config, Dispatch, OutputDecl, PipelineConfig, PrecisionHint};

/// A vertex buffer whose size matched the pipeline layout.
#[derive(Debug, Copy, Clone)]
pub struct BoundBuffer<'a> {
    bytes: &'a [u8],
    layout: ResolvedLayout,
    count: usize,
}

impl<'a> BoundBuffer<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vertex> {
        (index < self.count).then(|| self.layout.fetch(self.bytes, index))
    }

    pub fn iter(&self) -> impl Iterator<Item = Vertex> + '_ {
        (0..self.count).map(move |i| self.layout.fetch(self.bytes, i))
    }
}

/// Counters from one [`Pipeline::draw`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DrawStats {
    pub vertices: usize,
    pub triangles: usize,
    pub degenerate: usize,
    pub rejected: usize,
    pub fragments: u64,
}

/// A validated vertex stage ready to run.
#[derive(Debug, Clone)]
pub struct Pipeline<S> {
    config: PipelineConfig,
    layout: ResolvedLayout,
    color_precision: PrecisionHint,
    stage: S,
}

impl<S: VertexStage> Pipeline<S> {
    /// Validates `config` and binds `stage` to it.
    pub fn build(config: PipelineConfig, stage: S) -> Result<Self, PipelineError> {
        let layout = config.input_layout.validate().inspect_err(|e| {
            log::error!("pipeline input layout rejected: {e}");
        })?;
        let color_precision = config.validate_outputs().inspect_err(|e| {
            log::error!("pipeline outputs rejected: {e}");
        })?;

        log::info!(
            "pipeline built: stride={} position@{} color@{} color_precision={:?} dispatch={:?}",
            layout.stride(),
            layout.position().location,
            layout.color().location,
            color_precision,
            config.dispatch,
        );

        Ok(Self {
            config,
            layout,
            color_precision,
            stage,
        })
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[inline]
    pub fn layout(&self) -> &ResolvedLayout {
        &self.layout
    }

    #[inline]
    pub fn color_precision(&self) -> PrecisionHint {
        self.color_precision
    }

    #[inline]
    pub fn stage(&self) -> &S {
        &self.stage
    }

    /// Binds raw vertex bytes laid out per the configured input layout.
    pub fn bind<'a>(&self, bytes: &'a [u8]) -> Result<BoundBuffer<'a>, PipelineError> {
        let count = self.layout.vertex_count(bytes.len()).ok_or(PipelineError::BufferSize {
            len: bytes.len(),
            stride: self.layout.stride(),
        })?;
        Ok(BoundBuffer {
            bytes,
            layout: self.layout,
            count,
        })
    }

    /// Packs `vertices` with the configured layout.
    pub fn encode(&self, vertices: &[Vertex]) -> Vec<u8> {
        self.layout.encode(vertices)
    }

    /// Runs the stage once per vertex. `out[i]` belongs to vertex `i`.
    pub fn process_buffer(&self, buffer: &BoundBuffer<'_>) -> Vec<VertexOutput> {
        match self.config.dispatch {
            Dispatch::Serial => buffer.iter().map(|v| self.stage.process(&v)).collect(),
            Dispatch::Parallel => (0..buffer.len())
                .into_par_iter()
                .map(|i| self.stage.process(&buffer.layout.fetch(buffer.bytes, i)))
                .collect(),
        }
    }

    /// Runs the stage over already-typed vertices, bypassing byte fetch.
    pub fn process_vertices(&self, vertices: &[Vertex]) -> Vec<VertexOutput> {
        match self.config.dispatch {
            Dispatch::Serial => vertices.iter().map(|v| self.stage.process(v)).collect(),
            Dispatch::Parallel => vertices.par_iter().map(|v| self.stage.process(v)).collect(),
        }
    }

    /// Processes every vertex, assembles triangles and rasterizes them into
    /// `target` in primitive order.
    pub fn draw(
        &self,
        buffer: &BoundBuffer<'_>,
        topology: Topology,
        target: &mut Framebuffer,
    ) -> DrawStats {
        let outputs = self.process_buffer(buffer);
        let viewport = target.viewport();

        let mut stats = DrawStats {
            vertices: outputs.len(),
            ..DrawStats::default()
        };

        let leftover = topology.leftover(outputs.len());
        if leftover != 0 {
            log::warn!("{topology:?}: {leftover} trailing vertices do not form a triangle");
        }

        for [a, b, c] in topology.triangles(outputs.len()) {
            stats.triangles += 1;
            let tri = [&outputs[a], &outputs[b], &outputs[c]];
            match rasterize_triangle(viewport, tri, |f| target.write(&f)) {
                Coverage::Covered(n) => stats.fragments += u64::from(n),
                Coverage::Degenerate => stats.degenerate += 1,
                Coverage::Rejected => {
                    log::debug!("triangle [{a}, {b}, {c}] needs clipping; skipped");
                    stats.rejected += 1;
                }
            }
        }

        log::debug!("draw: {stats:?}");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{AttributeFormat, InputLayout, Semantic, VertexAttribute};
    use crate::paint::Color;
    use crate::stage::{from_fn, ClipPosition, PassthroughStage, VaryingColor};

    fn canvas() -> Vec<Vertex> {
        vec![
            Vertex::new([-1.0, -1.0, 0.0], [1.0, 0.0, 0.0, 0.5]),
            Vertex::new([1.0, -1.0, 0.0], [0.0, 1.0, 0.0, 0.5]),
            Vertex::new([-1.0, 1.0, 0.0], [0.0, 0.0, 1.0, 0.5]),
            Vertex::new([-1.0, 1.0, 0.0], [1.0, 0.0, 0.0, 0.5]),
            Vertex::new([1.0, -1.0, 0.0], [0.0, 1.0, 0.0, 0.5]),
            Vertex::new([1.0, 1.0, 0.0], [0.0, 0.0, 1.0, 0.5]),
        ]
    }

    fn many_vertices(n: usize) -> Vec<Vertex> {
        (0..n)
            .map(|i| {
                let f = i as f32;
                let color = [(f * 0.01) % 1.0, 0.5, 1.0 - (f * 0.003) % 1.0, 1.0];
                Vertex::new([f, -f * 0.5, f * 0.25], color)
            })
            .collect()
    }

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn default_config_builds() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        assert_eq!(p.layout().stride(), 28);
        assert_eq!(p.color_precision(), PrecisionHint::Reduced);
    }

    #[test]
    fn layout_mismatch_aborts_build() {
        let mut config = PipelineConfig::default();
        config.input_layout.attributes[1].format = AttributeFormat::Float32x3;
        let err = Pipeline::build(config, PassthroughStage).unwrap_err();
        assert!(matches!(err, PipelineError::ComponentMismatch { semantic: Semantic::Color, .. }));
    }

    #[test]
    fn missing_slot_aborts_build() {
        let mut config = PipelineConfig::default();
        config.input_layout.attributes.remove(0);
        assert_eq!(
            Pipeline::build(config, PassthroughStage).unwrap_err(),
            PipelineError::MissingAttribute(Semantic::Position)
        );
    }

    // ── bind ──────────────────────────────────────────────────────────────

    #[test]
    fn bind_rejects_partial_vertex() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let bytes = vec![0u8; 28 * 2 + 4];
        assert_eq!(
            p.bind(&bytes).unwrap_err(),
            PipelineError::BufferSize { len: 60, stride: 28 }
        );
    }

    #[test]
    fn bind_counts_vertices() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = canvas();
        let b = p.bind(Vertex::as_bytes(&v)).unwrap();
        assert_eq!(b.len(), 6);
        assert_eq!(b.get(5), Some(v[5]));
        assert_eq!(b.get(6), None);
    }

    // ── process ───────────────────────────────────────────────────────────

    #[test]
    fn one_output_per_vertex_in_order() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = many_vertices(100);
        let out = p.process_buffer(&p.bind(Vertex::as_bytes(&v)).unwrap());
        assert_eq!(out.len(), v.len());
        for (o, v) in out.iter().zip(&v) {
            let [x, y, z] = v.position;
            assert_eq!(o.clip, ClipPosition::new(x, y, z, 1.0));
            assert_eq!(o.color.to_array(), v.color);
        }
    }

    #[test]
    fn parallel_dispatch_matches_serial() {
        let v = many_vertices(4096);
        let serial = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let parallel = Pipeline::build(
            PipelineConfig::default().with_dispatch(Dispatch::Parallel),
            PassthroughStage,
        )
        .unwrap();

        let bytes = Vertex::as_bytes(&v);
        let a = serial.process_buffer(&serial.bind(bytes).unwrap());
        let b = parallel.process_buffer(&parallel.bind(bytes).unwrap());
        assert_eq!(a, b);
        assert_eq!(parallel.process_vertices(&v), a);
    }

    #[test]
    fn permuted_input_gives_permuted_output() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = many_vertices(32);
        // Deterministic permutation: multiply by a unit modulo 32.
        let perm: Vec<usize> = (0..32).map(|i| (i * 7 + 3) % 32).collect();
        let shuffled: Vec<Vertex> = perm.iter().map(|&i| v[i]).collect();

        let base = p.process_vertices(&v);
        let permuted = p.process_vertices(&shuffled);
        for (k, &i) in perm.iter().enumerate() {
            assert_eq!(permuted[k], base[i]);
        }
    }

    #[test]
    fn custom_layout_feeds_the_same_vertices() {
        let config = PipelineConfig {
            input_layout: InputLayout {
                stride: 40,
                attributes: vec![
                    VertexAttribute::new(Semantic::Color, 2, AttributeFormat::Float32x4, 8),
                    VertexAttribute::new(Semantic::Position, 0, AttributeFormat::Float32x3, 28),
                ],
            },
            ..PipelineConfig::default()
        };
        let p = Pipeline::build(config, PassthroughStage).unwrap();
        let v = canvas();
        let bytes = p.encode(&v);
        let out = p.process_buffer(&p.bind(&bytes).unwrap());
        let expected: Vec<_> = v.iter().map(|v| PassthroughStage.process(v)).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn closure_stage_runs_through_pipeline() {
        let stage = from_fn(|v: &Vertex| {
            VertexOutput::new(ClipPosition::from_position(v.position), VaryingColor(Color::white()))
        });
        let p = Pipeline::build(PipelineConfig::default(), stage).unwrap();
        let out = p.process_vertices(&canvas());
        assert!(out.iter().all(|o| o.color.color() == Color::white()));
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn canvas_covers_every_pixel() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = canvas();
        let mut fb = Framebuffer::new(32, 24, Color::transparent());
        let stats = p.draw(&p.bind(Vertex::as_bytes(&v)).unwrap(), Topology::TriangleList, &mut fb);

        assert_eq!(stats.vertices, 6);
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.fragments, 32 * 24);
        assert!(fb.pixels().iter().all(|c| (c.a - 0.5).abs() < 1e-6));
    }

    #[test]
    fn strip_draws_same_quad() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = [
            Vertex::new([-1.0, -1.0, 0.0], [1.0; 4]),
            Vertex::new([1.0, -1.0, 0.0], [1.0; 4]),
            Vertex::new([-1.0, 1.0, 0.0], [1.0; 4]),
            Vertex::new([1.0, 1.0, 0.0], [1.0; 4]),
        ];
        let mut fb = Framebuffer::new(10, 10, Color::transparent());
        let buffer = p.bind(Vertex::as_bytes(&v)).unwrap();
        let stats = p.draw(&buffer, Topology::TriangleStrip, &mut fb);
        assert_eq!(stats.triangles, 2);
        assert_eq!(stats.fragments, 100);
    }

    #[test]
    fn degenerate_and_incomplete_primitives_are_counted() {
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = [
            Vertex::new([0.0, 0.0, 0.0], [1.0; 4]),
            Vertex::new([0.5, 0.5, 0.0], [1.0; 4]),
            Vertex::new([1.0, 1.0, 0.0], [1.0; 4]),
            Vertex::new([1.0, 1.0, 0.0], [1.0; 4]),
        ];
        let mut fb = Framebuffer::new(4, 4, Color::transparent());
        let stats = p.draw(&p.bind(Vertex::as_bytes(&v)).unwrap(), Topology::TriangleList, &mut fb);
        assert_eq!(stats.triangles, 1);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.fragments, 0);
    }

    #[test]
    fn edge_midpoint_pixel_averages_endpoint_colors() {
        // On an 8x8 target the top edge runs between pixel centers (0.5, 0.5)
        // and (6.5, 0.5); its midpoint is the center of pixel (3, 0).
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let v = [
            Vertex::new([-0.875, 0.875, 0.0], [0.0, 0.0, 0.0, 0.0]),
            Vertex::new([0.625, 0.875, 0.0], [1.0, 1.0, 1.0, 1.0]),
            Vertex::new([-0.875, -0.625, 0.0], [0.3, 0.2, 0.9, 0.4]),
        ];
        let mut fb = Framebuffer::new(8, 8, Color::new(0.25, 0.25, 0.25, 1.0));
        let buffer = p.bind(Vertex::as_bytes(&v)).unwrap();
        p.draw(&buffer, Topology::TriangleList, &mut fb);

        let mid = fb.get(3, 0).unwrap();
        for ch in mid.to_array() {
            assert!((ch - 0.5).abs() < 1e-6, "{mid:?}");
        }
    }

    #[test]
    fn shared_vertex_keeps_exact_color_in_a_mesh() {
        // A fan of four triangles around the center of pixel (4, 4), with the
        // shared vertex at a different index in each triangle.
        let p = Pipeline::build(PipelineConfig::default(), PassthroughStage).unwrap();
        let center = Vertex::new([0.125, -0.125, 0.0], [0.1, 0.7, 0.3, 0.9]);
        let tl = Vertex::new([-0.875, 0.875, 0.0], [0.33, 0.66, 0.99, 0.123]);
        let tr = Vertex::new([0.875, 0.875, 0.0], [1.0, 0.0, 0.0, 1.0]);
        let br = Vertex::new([0.875, -0.875, 0.0], [0.0, 1.0, 0.0, 1.0]);
        let bl = Vertex::new([-0.875, -0.875, 0.0], [0.0, 0.0, 1.0, 1.0]);
        let v = [center, tl, tr, tr, center, br, br, bl, center, bl, center, tl];

        let mut fb = Framebuffer::new(8, 8, Color::transparent());
        let buffer = p.bind(Vertex::as_bytes(&v)).unwrap();
        let stats = p.draw(&buffer, Topology::TriangleList, &mut fb);
        assert_eq!(stats.triangles, 4);

        let bits = |c: [f32; 4]| c.map(f32::to_bits);
        assert_eq!(bits(fb.get(4, 4).unwrap().to_array()), bits(center.color));
        assert_eq!(bits(fb.get(0, 0).unwrap().to_array()), bits(tl.color));
    }
}
