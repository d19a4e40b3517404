//! Overmark Render Library
//!
//! Preview layer, committed raster surface and the vector-to-raster
//! compositor behind the core engine's `Surface` trait.

pub mod direct;
mod measure;
mod pipeline;
mod preview;
mod renderer;
pub mod svg;

pub use pipeline::RenderPipeline;
pub use preview::PreviewLayer;
pub use renderer::{RenderError, RenderResult, ResvgRasterizer, VectorRasterizer};
