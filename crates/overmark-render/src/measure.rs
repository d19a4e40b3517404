//! Font-backed text measurement.

use crate::renderer::ResvgRasterizer;
use crate::svg;
use overmark_core::shapes::Text;

/// Width of the laid-out glyphs of `text`, or `None` when no font could
/// shape it.
pub(crate) fn measure_text(rasterizer: &ResvgRasterizer, text: &Text) -> Option<f64> {
    if text.content.is_empty() || !rasterizer.has_fonts() {
        return None;
    }
    let document = svg::text_probe(text);
    let tree = match rasterizer.parse(&document) {
        Ok(tree) => tree,
        Err(e) => {
            log::warn!("Text measurement failed: {}", e);
            return None;
        }
    };
    let width = tree.root().abs_bounding_box().width() as f64;
    (width > 0.0).then_some(width)
}
