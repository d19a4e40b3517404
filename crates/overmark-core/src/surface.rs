//! Rendering seams between the engine and a raster backend.

use crate::scene::Scene;
use crate::shapes::{Shape, ShapeStyle, Text};
use kurbo::{Point, Rect};

/// Average glyph advance as a fraction of the font size.
const APPROX_ADVANCE_RATIO: f64 = 0.6;

/// Text-extent query supplied by whatever lays out glyphs.
pub trait TextMeasure {
    /// Advance width of `text.content` at its font size, family and weight.
    fn text_width(&self, text: &Text) -> f64;
}

/// Character-count estimate used when no font backend is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMeasure;

impl TextMeasure for ApproximateTextMeasure {
    fn text_width(&self, text: &Text) -> f64 {
        text.content.chars().count() as f64 * text.font_size * APPROX_ADVANCE_RATIO
    }
}

/// The two-layer render target driven by the engine.
///
/// The preview layer is transient and replaced wholesale on every call to
/// [`Surface::set_preview`]. Everything else writes to the committed raster.
pub trait Surface: TextMeasure {
    /// Replace the preview layer; `None` clears it.
    fn set_preview(&mut self, shape: Option<&Shape>);

    /// Composite a finished shape onto the committed surface, leaving prior
    /// content untouched.
    fn commit(&mut self, shape: &Shape);

    /// Clear the committed surface and rasterize every scene shape in
    /// z-order, then draw selection handles around `handles` if given.
    fn redraw(&mut self, scene: &Scene, handles: Option<Rect>);

    /// Draw one pen segment directly onto the committed surface.
    fn stroke_segment(&mut self, from: Point, to: Point, style: &ShapeStyle);

    /// Remove committed pixels along a segment of the given width.
    fn erase_segment(&mut self, from: Point, to: Point, width: f64);

    /// Clear both layers.
    fn clear(&mut self);

    /// Reallocate the committed surface, keeping pixels in the overlap.
    fn resize(&mut self, width: u32, height: u32);
}
