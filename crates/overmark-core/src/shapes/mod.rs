//! Annotation shapes.

mod arrow;
mod cross;
mod ellipse;
mod freehand;
mod line;
mod polygon;
mod rectangle;
mod text;

pub use arrow::{ARROW_HEAD_ANGLE, ARROW_HEAD_LENGTH, Arrow};
pub use cross::Cross;
pub use ellipse::{Circle, Ellipse};
pub use freehand::Freehand;
pub use line::Line;
pub use polygon::{Polygon, RotatedHighlight};
pub use rectangle::{Highlight, Rectangle};
pub use text::{FontFamily, FontWeight, Text};

use crate::error::EngineError;
use crate::geometry::rotate_point;
use crate::surface::TextMeasure;
use kurbo::{BezPath, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Same color with its alpha multiplied by `opacity` (0.0..=1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl FromStr for SerializableColor {
    type Err = EngineError;

    /// Parse `#rrggbb` or `#rrggbbaa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Style properties captured from the active tool when a shape is committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Whether the fill color is applied.
    pub fill_enabled: bool,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Fill color to paint, if filling is enabled and a color is set.
    pub fn fill(&self) -> Option<SerializableColor> {
        self.fill_color.filter(|_| self.fill_enabled)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 3.0,
            fill_color: None,
            fill_enabled: false,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Behavior shared by every shape variant.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;

    /// Shift every defining coordinate by `delta`.
    fn translate(&mut self, delta: Vec2);

    /// Outline for rasterization. Text has no outline and returns an empty path.
    fn to_path(&self) -> BezPath;
}

/// Variant tag of a shape, for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Path,
    Text,
    Rect,
    Circle,
    Ellipse,
    Line,
    Arrow,
    Polygon,
    Cross,
    Highlight,
    RotatedHighlight,
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Path(Freehand),
    Text(Text),
    Rect(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Line(Line),
    Arrow(Arrow),
    Polygon(Polygon),
    Cross(Cross),
    Highlight(Highlight),
    RotatedHighlight(RotatedHighlight),
}

macro_rules! dispatch {
    ($shape:expr, $s:ident => $body:expr) => {
        match $shape {
            Shape::Path($s) => $body,
            Shape::Text($s) => $body,
            Shape::Rect($s) => $body,
            Shape::Circle($s) => $body,
            Shape::Ellipse($s) => $body,
            Shape::Line($s) => $body,
            Shape::Arrow($s) => $body,
            Shape::Polygon($s) => $body,
            Shape::Cross($s) => $body,
            Shape::Highlight($s) => $body,
            Shape::RotatedHighlight($s) => $body,
        }
    };
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        dispatch!(self, s => s.id())
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Path(_) => ShapeKind::Path,
            Shape::Text(_) => ShapeKind::Text,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Cross(_) => ShapeKind::Cross,
            Shape::Highlight(_) => ShapeKind::Highlight,
            Shape::RotatedHighlight(_) => ShapeKind::RotatedHighlight,
        }
    }

    pub fn style(&self) -> &ShapeStyle {
        dispatch!(self, s => s.style())
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        dispatch!(self, s => s.style_mut())
    }

    pub fn to_path(&self) -> BezPath {
        dispatch!(self, s => s.to_path())
    }

    pub fn translate(&mut self, delta: Vec2) {
        dispatch!(self, s => s.translate(delta))
    }

    /// Copy of this shape shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Shape {
        let mut shape = self.clone();
        shape.translate(delta);
        shape
    }

    /// Bounding box. Text needs `measure` for its width.
    pub fn bounds(&self, measure: &dyn TextMeasure) -> Rect {
        match self {
            Shape::Path(s) => s.bounds(),
            Shape::Text(s) => s.bounds(measure),
            Shape::Rect(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Cross(s) => s.bounds(),
            Shape::Highlight(s) => s.bounds(),
            Shape::RotatedHighlight(s) => s.bounds(),
        }
    }

    /// Whether the outline encloses an area that can be filled.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            Shape::Rect(_)
                | Shape::Circle(_)
                | Shape::Ellipse(_)
                | Shape::Polygon(_)
                | Shape::Highlight(_)
                | Shape::RotatedHighlight(_)
        )
    }

    /// One-way promotion of axis-aligned boxes to explicit outlines.
    ///
    /// Rect becomes Polygon and Highlight becomes RotatedHighlight; the id is
    /// kept. Every other variant is returned unchanged.
    pub fn to_polygon(self) -> Shape {
        match self {
            Shape::Rect(rect) => Shape::Polygon(Polygon::from(rect)),
            Shape::Highlight(highlight) => Shape::RotatedHighlight(RotatedHighlight::from(highlight)),
            other => other,
        }
    }

    /// Copy of this shape rotated by `angle` radians about `pivot`.
    ///
    /// Boxes are promoted first. Circle, Ellipse, Text and Cross have no
    /// orientation, so only their box center moves.
    pub fn rotated(&self, angle: f64, pivot: Point, measure: &dyn TextMeasure) -> Shape {
        let rotate = |p: &mut Point| *p = rotate_point(*p, pivot, angle);
        let mut shape = self.clone().to_polygon();
        match &mut shape {
            Shape::Path(s) => s.points.iter_mut().for_each(rotate),
            Shape::Polygon(s) => s.points.iter_mut().for_each(rotate),
            Shape::RotatedHighlight(s) => s.points.iter_mut().for_each(rotate),
            Shape::Line(s) => {
                rotate(&mut s.start);
                rotate(&mut s.end);
            }
            Shape::Arrow(s) => {
                rotate(&mut s.start);
                rotate(&mut s.end);
            }
            Shape::Circle(s) => rotate(&mut s.center),
            Shape::Ellipse(s) => rotate(&mut s.center),
            Shape::Cross(s) => rotate(&mut s.center),
            Shape::Text(s) => {
                let half = Vec2::new(measure.text_width(s) / 2.0, s.font_size / 2.0);
                s.position = rotate_point(s.position + half, pivot, angle) - half;
            }
            Shape::Rect(_) | Shape::Highlight(_) => {}
        }
        shape
    }
}
