//! Color model shared by the vertex stage, the rasterizer and framebuffer export.
//!
//! Colors are straight (un-premultiplied) alpha in linear space.

pub mod color;

pub use color::Color;
