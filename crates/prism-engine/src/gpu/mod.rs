//! wgpu bridge for the vertex stage.
//!
//! The CPU pipeline's validated layout is translated into wgpu vertex buffer
//! state, and a WGSL module equivalent to [`PassthroughStage`](crate::PassthroughStage)
//! is generated with matching attribute locations. Device, surface and frame
//! management are the caller's responsibility; this module only needs a
//! [`RenderCtx`] and a [`RenderTarget`].

mod ctx;
mod layout;
mod shader;
mod stage;

pub use ctx::{RenderCtx, RenderTarget};
pub use layout::GpuVertexLayout;
pub use shader::passthrough_wgsl;
pub use stage::GpuStage;
