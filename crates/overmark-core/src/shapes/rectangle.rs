//! Axis-aligned boxes: rectangle and translucent highlight.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }

    /// Replace position and size with `rect`.
    pub fn set_rect(&mut self, rect: Rect) {
        self.position = rect.origin();
        self.width = rect.width();
        self.height = rect.height();
    }

    /// Corners in drawing order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let r = self.as_rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }
}

impl ShapeTrait for Rectangle {
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
        self.as_rect().to_path(0.1)
    }
}

/// A filled translucent box in the stroke color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Fill opacity applied to the stroke color.
    pub opacity: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Highlight {
    pub fn new(position: Point, width: f64, height: f64, opacity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            opacity,
            style: ShapeStyle::default(),
        }
    }

    pub fn from_corners(p1: Point, p2: Point, opacity: f64) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.origin(), rect.width(), rect.height(), opacity)
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.position = rect.origin();
        self.width = rect.width();
        self.height = rect.height();
    }

    pub fn corners(&self) -> [Point; 4] {
        let r = self.as_rect();
        [
            Point::new(r.x0, r.y0),
            Point::new(r.x1, r.y0),
            Point::new(r.x1, r.y1),
            Point::new(r.x0, r.y1),
        ]
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }
}

impl ShapeTrait for Highlight {
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
        self.as_rect().to_path(0.1)
    }
}
