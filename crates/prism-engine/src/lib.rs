//! Prism engine crate.
//!
//! This crate owns the vertex stage of a rasterization pipeline and the
//! contract around it: the input attribute layout, the pipeline configuration
//! that is validated once at build time, and a CPU reference rasterizer that
//! interpolates the stage's varyings across triangles.
//!
//! | Module | Contents |
//! |---|---|
//! | [`stage`] | `VertexStage`, `PassthroughStage`, `ClipPosition`, `VaryingColor` |
//! | [`layout`] | `InputLayout`, `AttributeFormat`, vertex fetch |
//! | [`pipeline`] | `PipelineConfig`, `Pipeline`, precision hints, dispatch |
//! | [`raster`] | topology, coverage, barycentric interpolation, framebuffer |
//! | [`gpu`] | wgpu vertex layout + WGSL passthrough stage |

pub mod coords;
pub mod error;
pub mod gpu;
pub mod layout;
pub mod logging;
pub mod paint;
pub mod pipeline;
pub mod raster;
pub mod stage;
pub mod vertex;

pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineConfig};
pub use stage::{PassthroughStage, VertexOutput, VertexStage};
pub use vertex::Vertex;
