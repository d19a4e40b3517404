//! Circle and ellipse shapes.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Circle as KurboCircle, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    pub center: Point,
    pub radius: f64,
    pub style: ShapeStyle,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius: radius.abs(),
            style: ShapeStyle::default(),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius * 2.0, self.radius * 2.0))
    }

    pub fn contains(&self, point: Point) -> bool {
        point.distance(self.center) <= self.radius
    }
}

impl ShapeTrait for Circle {
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
        self.center += delta;
    }

    fn to_path(&self) -> BezPath {
        KurboCircle::new(self.center, self.radius).to_path(0.1)
    }
}

/// An axis-aligned ellipse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x: radius_x.abs(),
            radius_y: radius_y.abs(),
            style: ShapeStyle::default(),
        }
    }

    /// Create an ellipse inscribed in the box spanned by two corners.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.radius_x * 2.0, self.radius_y * 2.0))
    }

    /// Normalized containment test; a zero radius contains nothing.
    pub fn contains(&self, point: Point) -> bool {
        if self.radius_x <= f64::EPSILON || self.radius_y <= f64::EPSILON {
            return false;
        }
        let dx = (point.x - self.center.x) / self.radius_x;
        let dy = (point.y - self.center.y) / self.radius_y;
        dx * dx + dy * dy <= 1.0
    }
}

impl ShapeTrait for Ellipse {
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
        self.center += delta;
    }

    fn to_path(&self) -> BezPath {
        KurboEllipse::new(self.center, (self.radius_x, self.radius_y), 0.0).to_path(0.1)
    }
}
