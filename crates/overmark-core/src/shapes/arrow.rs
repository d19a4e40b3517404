//! Arrow shape: a shaft with a two-segment head at `end`.

use super::{ShapeId, ShapeStyle, ShapeTrait};
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_6;
use uuid::Uuid;

/// Length of each arrowhead segment.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;
/// Angle between the shaft and each arrowhead segment.
pub const ARROW_HEAD_ANGLE: f64 = FRAC_PI_6;

/// An arrow pointing from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    /// Tail of the arrow.
    pub start: Point,
    /// Tip of the arrow.
    pub end: Point,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Arrow {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::default(),
        }
    }

    /// Shaft direction angle in radians.
    pub fn angle(&self) -> f64 {
        (self.end - self.start).atan2()
    }

    /// The two head segments, each running from the tip outward.
    pub fn head_segments(&self) -> [(Point, Point); 2] {
        let angle = self.angle();
        let barb = |offset: f64| {
            let a = angle + offset;
            self.end - Vec2::new(a.cos(), a.sin()) * ARROW_HEAD_LENGTH
        };
        [
            (self.end, barb(-ARROW_HEAD_ANGLE)),
            (self.end, barb(ARROW_HEAD_ANGLE)),
        ]
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }
}

impl ShapeTrait for Arrow {
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
        self.start += delta;
        self.end += delta;
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.line_to(self.end);
        for (tip, barb) in self.head_segments() {
            path.move_to(tip);
            path.line_to(barb);
        }
        path
    }
}
