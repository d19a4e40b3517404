//! The two-layer render pipeline behind the engine's `Surface`.

use crate::direct;
use crate::preview::PreviewLayer;
use crate::renderer::{RenderError, RenderResult, ResvgRasterizer, VectorRasterizer};
use crate::svg;
use kurbo::{Point, Rect};
use log::{debug, warn};
use overmark_core::scene::Scene;
use overmark_core::shapes::{Shape, ShapeStyle, Text};
use overmark_core::surface::{ApproximateTextMeasure, Surface, TextMeasure};
use tiny_skia::Pixmap;

/// Committed raster plus preview layer.
pub struct RenderPipeline<R: VectorRasterizer = ResvgRasterizer> {
    committed: Pixmap,
    preview: PreviewLayer,
    rasterizer: R,
}

impl RenderPipeline<ResvgRasterizer> {
    /// Pipeline rasterizing with resvg and the system fonts.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Self::with_rasterizer(width, height, ResvgRasterizer::new())
    }
}

impl<R: VectorRasterizer> RenderPipeline<R> {
    pub fn with_rasterizer(width: u32, height: u32, rasterizer: R) -> RenderResult<Self> {
        let committed = Pixmap::new(width, height).ok_or(RenderError::SurfaceAlloc { width, height })?;
        Ok(Self {
            committed,
            preview: PreviewLayer::new(),
            rasterizer,
        })
    }

    pub fn width(&self) -> u32 {
        self.committed.width()
    }

    pub fn height(&self) -> u32 {
        self.committed.height()
    }

    /// The committed surface.
    pub fn committed(&self) -> &Pixmap {
        &self.committed
    }

    pub fn preview(&self) -> &PreviewLayer {
        &self.preview
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// What the user currently sees: the committed surface with the preview
    /// layer on top.
    pub fn frame(&self) -> RenderResult<Pixmap> {
        self.preview.composite_over(&self.committed, &self.rasterizer)
    }

    /// Rasterize one shape onto the committed surface, falling back to
    /// direct drawing if the vector path fails.
    fn composite(&mut self, shape: &Shape) {
        let document = svg::document(self.width(), self.height(), [shape]);
        if let Err(e) = self.rasterizer.rasterize(&document, &mut self.committed.as_mut()) {
            warn!("Composite of {:?} {} failed, drawing directly: {}", shape.kind(), shape.id(), e);
            let text_width = match shape {
                Shape::Text(text) => self.text_width(text),
                _ => 0.0,
            };
            direct::draw_shape(&mut self.committed, shape, text_width);
        }
    }
}

impl<R: VectorRasterizer> TextMeasure for RenderPipeline<R> {
    fn text_width(&self, text: &Text) -> f64 {
        self.rasterizer
            .text_width(text)
            .unwrap_or_else(|| ApproximateTextMeasure.text_width(text))
    }
}

impl<R: VectorRasterizer> Surface for RenderPipeline<R> {
    fn set_preview(&mut self, shape: Option<&Shape>) {
        self.preview.set(shape.cloned());
    }

    fn commit(&mut self, shape: &Shape) {
        self.composite(shape);
    }

    fn redraw(&mut self, scene: &Scene, handles: Option<Rect>) {
        direct::clear(&mut self.committed);
        for shape in scene.shapes_ordered() {
            self.composite(shape);
        }
        if let Some(bounds) = handles {
            direct::draw_handles(&mut self.committed, bounds);
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, style: &ShapeStyle) {
        direct::stroke_segment(&mut self.committed, from, to, style);
    }

    fn erase_segment(&mut self, from: Point, to: Point, width: f64) {
        direct::erase_segment(&mut self.committed, from, to, width);
    }

    fn clear(&mut self) {
        direct::clear(&mut self.committed);
        self.preview.clear();
    }

    fn resize(&mut self, width: u32, height: u32) {
        match direct::resized(&self.committed, width, height) {
            Some(pixmap) => {
                debug!("Committed surface now {}x{}", width, height);
                self.committed = pixmap;
            }
            None => warn!("{}, keeping current surface", RenderError::SurfaceAlloc { width, height }),
        }
    }
}
