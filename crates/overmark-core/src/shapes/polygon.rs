//! Closed point outlines: generic polygons and rotated highlights.

use super::{Highlight, Rectangle, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::points_bounds;
use kurbo::{BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use uuid::Uuid;

/// Number of vertices on a star outline (alternating outer and inner).
pub const STAR_POINTS: usize = 10;
/// Inner radius as a fraction of the outer radius.
pub const STAR_INNER_RATIO: f64 = 0.4;

fn closed_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        path.move_to(*first);
        for point in iter {
            path.line_to(*point);
        }
        path.close_path();
    }
    path
}

/// A closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: ShapeId,
    /// Vertices in order; the last connects back to the first.
    pub points: Vec<Point>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: ShapeStyle::default(),
        }
    }

    /// Isosceles triangle with its apex at `start`, mirrored about the
    /// vertical through `start`.
    pub fn triangle(start: Point, current: Point) -> Self {
        Self::new(vec![
            start,
            current,
            Point::new(2.0 * start.x - current.x, current.y),
        ])
    }

    /// Five-pointed star centered between the drag points, with an outer
    /// radius of half the drag distance and the first tip straight up.
    pub fn star(start: Point, current: Point) -> Self {
        let center = start.midpoint(current);
        let outer = start.distance(current) / 2.0;
        let inner = outer * STAR_INNER_RATIO;
        let points = (0..STAR_POINTS)
            .map(|i| {
                let radius = if i % 2 == 0 { outer } else { inner };
                let angle = PI / 5.0 * i as f64 - PI / 2.0;
                Point::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
            })
            .collect();
        Self::new(points)
    }

    pub fn bounds(&self) -> Rect {
        points_bounds(&self.points)
    }
}

impl From<Rectangle> for Polygon {
    fn from(rect: Rectangle) -> Self {
        Self {
            id: rect.id,
            points: rect.corners().to_vec(),
            style: rect.style,
        }
    }
}

impl ShapeTrait for Polygon {
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
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn to_path(&self) -> BezPath {
        closed_path(&self.points)
    }
}

/// A highlight that has been rotated and is no longer axis-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotatedHighlight {
    pub(crate) id: ShapeId,
    pub points: Vec<Point>,
    pub opacity: f64,
    pub style: ShapeStyle,
}

impl RotatedHighlight {
    pub fn bounds(&self) -> Rect {
        points_bounds(&self.points)
    }
}

impl From<Highlight> for RotatedHighlight {
    fn from(highlight: Highlight) -> Self {
        Self {
            id: highlight.id,
            points: highlight.corners().to_vec(),
            opacity: highlight.opacity,
            style: highlight.style,
        }
    }
}

impl ShapeTrait for RotatedHighlight {
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
        for point in &mut self.points {
            *point += delta;
        }
    }

    fn to_path(&self) -> BezPath {
        closed_path(&self.points)
    }
}
