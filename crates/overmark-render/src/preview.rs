//! Transient preview layer for the shape being drawn.

use crate::renderer::{RenderResult, VectorRasterizer};
use crate::svg;
use overmark_core::shapes::Shape;
use tiny_skia::Pixmap;

/// Vector description of the in-progress shape. Replaced wholesale on every
/// update and never persisted.
#[derive(Debug, Clone, Default)]
pub struct PreviewLayer {
    shape: Option<Shape>,
}

impl PreviewLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, shape: Option<Shape>) {
        self.shape = shape;
    }

    pub fn clear(&mut self) {
        self.shape = None;
    }

    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.shape.is_none()
    }

    /// SVG document of the layer at the given size.
    pub fn to_svg(&self, width: u32, height: u32) -> String {
        svg::document(width, height, self.shape.iter())
    }

    /// `committed` with this layer drawn on top, leaving `committed` untouched.
    pub fn composite_over(&self, committed: &Pixmap, rasterizer: &dyn VectorRasterizer) -> RenderResult<Pixmap> {
        let mut frame = committed.clone();
        if !self.is_empty() {
            rasterizer.rasterize(&self.to_svg(frame.width(), frame.height()), &mut frame.as_mut())?;
        }
        Ok(frame)
    }
}
