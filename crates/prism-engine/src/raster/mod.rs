//! CPU reference rasterizer.
//!
//! This is the collaborator that consumes vertex stage outputs: it assembles
//! triangles, finds covered pixel centers and interpolates the color varying
//! at each of them. It performs no clipping or culling; triangles needing
//! clipping are reported as [`Coverage::Rejected`] and skipped.

mod framebuffer;
mod interpolate;
mod topology;
mod triangle;

pub use framebuffer::Framebuffer;
pub use interpolate::{interpolate_color, interpolate_depth, Barycentric};
pub use topology::Topology;
pub use triangle::{rasterize_triangle, Coverage, Fragment};
