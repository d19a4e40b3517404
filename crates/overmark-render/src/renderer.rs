//! Rasterizer abstraction and errors.

use overmark_core::shapes::{FontFamily, Text};
use std::sync::Arc;
use thiserror::Error;
use tiny_skia::{PixmapMut, Transform};

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse failed: {0}")]
    SvgParse(String),
    #[error("Cannot allocate a {width}x{height} surface")]
    SurfaceAlloc { width: u32, height: u32 },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Converts a vector description into pixels.
pub trait VectorRasterizer {
    /// Composite `svg` over the existing contents of `target`.
    fn rasterize(&self, svg: &str, target: &mut PixmapMut) -> RenderResult<()>;

    /// Laid-out width of `text`, if this rasterizer has fonts to measure with.
    fn text_width(&self, _text: &Text) -> Option<f64> {
        None
    }
}

/// usvg/resvg rasterizer.
pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
}

impl ResvgRasterizer {
    /// Rasterizer with the system fonts loaded.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} font faces", db.len());
        Self::with_fontdb(db)
    }

    /// Rasterizer with no fonts; text renders as nothing.
    pub fn without_fonts() -> Self {
        Self::with_fontdb(usvg::fontdb::Database::new())
    }

    fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        let mut options = usvg::Options::default();
        options.font_family = FontFamily::default().name().to_string();
        options.fontdb = Arc::new(db);
        Self { options }
    }

    pub(crate) fn parse(&self, svg: &str) -> RenderResult<usvg::Tree> {
        usvg::Tree::from_str(svg, &self.options).map_err(|e| RenderError::SvgParse(e.to_string()))
    }

    pub(crate) fn has_fonts(&self) -> bool {
        !self.options.fontdb.is_empty()
    }
}

impl Default for ResvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorRasterizer for ResvgRasterizer {
    fn rasterize(&self, svg: &str, target: &mut PixmapMut) -> RenderResult<()> {
        let tree = self.parse(svg)?;
        resvg::render(&tree, Transform::identity(), target);
        Ok(())
    }

    fn text_width(&self, text: &Text) -> Option<f64> {
        crate::measure::measure_text(self, text)
    }
}
