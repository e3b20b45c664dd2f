//! Screen-space geometry used by the rasterizer.
//!
//! Canonical screen space:
//! - Pixels, origin top-left
//! - +X right, +Y down
//! - Pixel `(x, y)` has its sample point at `(x + 0.5, y + 0.5)`
//!
//! NDC (+Y up) is mapped to this space by [`Viewport::ndc_to_screen`].

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
