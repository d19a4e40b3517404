//! Cross mark: a horizontal and a vertical stroke through a center.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plus sign spanning `width` across and `height` down, centered at `center`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cross {
    pub(crate) id: ShapeId,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub style: ShapeStyle,
}

impl Cross {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            width: width.abs(),
            height: height.abs(),
            style: ShapeStyle::default(),
        }
    }

    /// Cross filling the box spanned by the drag.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.center(), rect.width(), rect.height())
    }

    /// Horizontal stroke first, then the vertical one.
    pub fn segments(&self) -> [(Point, Point); 2] {
        let r = self.bounds();
        let c = self.center;
        [
            (Point::new(r.x0, c.y), Point::new(r.x1, c.y)),
            (Point::new(c.x, r.y0), Point::new(c.x, r.y1)),
        ]
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (self.width, self.height))
    }
}

impl ShapeTrait for Cross {
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
        let mut path = BezPath::new();
        for (from, to) in self.segments() {
            path.move_to(from);
            path.line_to(to);
        }
        path
    }
}
