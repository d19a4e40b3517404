//! Text shape.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use crate::surface::TextMeasure;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font family options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    /// Generic sans-serif (default).
    #[default]
    SansSerif,
    Serif,
    Monospace,
}

impl FontFamily {
    /// Generic family name as understood by font matching.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::SansSerif => "sans-serif",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
        }
    }
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    /// Regular weight (default).
    #[default]
    Regular,
    Bold,
}

impl FontWeight {
    /// Numeric weight on the 100..=900 scale.
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Bold => 700,
        }
    }
}

/// A single-line text annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Position (top-left corner of text bounding box).
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    pub font_family: FontFamily,
    pub font_weight: FontWeight,
    /// Style properties. Text is painted in the stroke color.
    pub style: ShapeStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    /// Create a new text shape.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: FontFamily::default(),
            font_weight: FontWeight::default(),
            style: ShapeStyle::default(),
        }
    }

    /// Box from the anchor, measured width by one line of `font_size`.
    pub fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        Rect::from_origin_size(self.position, (measure.text_width(self), self.font_size))
    }
}

impl ShapeTrait for Text {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    fn to_path(&self) -> BezPath {
        // Glyphs are laid out by the rasterizer.
        BezPath::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ApproximateTextMeasure;

    struct FixedMeasure(f64);

    impl TextMeasure for FixedMeasure {
        fn text_width(&self, _text: &Text) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_text_bounds_use_measure() {
        let mut text = Text::new(Point::new(10.0, 20.0), "hello".to_string());
        text.font_size = 15.0;
        assert_eq!(text.bounds(&FixedMeasure(42.0)), Rect::new(10.0, 20.0, 52.0, 35.0));
    }

    #[test]
    fn test_approximate_width_grows_with_content() {
        let short = Text::new(Point::ZERO, "ab".to_string());
        let long = Text::new(Point::ZERO, "abcdef".to_string());
        let measure = ApproximateTextMeasure;
        assert!(measure.text_width(&long) > measure.text_width(&short));
    }

    #[test]
    fn test_font_names() {
        assert_eq!(FontFamily::default().name(), "sans-serif");
        assert_eq!(FontWeight::Bold.value(), 700);
    }
}
