//! Point hit-testing against committed shapes.
//!
//! Tests are deliberately approximate: open outlines use their bounding box
//! plus a margin rather than exact stroke coverage.

use crate::geometry::distance_point_to_segment;
use crate::scene::Scene;
use crate::shapes::{Shape, ShapeId};
use crate::surface::TextMeasure;
use kurbo::Point;

/// Added to a path's stroke width to form its hit tolerance.
pub const PATH_HIT_PADDING: f64 = 5.0;
/// Outward margin around the bounds of outline-only shapes.
pub const OUTLINE_HIT_MARGIN: f64 = 10.0;

/// Whether `point` hits `shape`.
pub fn shape_hit(shape: &Shape, point: Point, measure: &dyn TextMeasure) -> bool {
    match shape {
        Shape::Path(path) => {
            let tolerance = path.style.stroke_width + PATH_HIT_PADDING;
            path.segments()
                .any(|(a, b)| distance_point_to_segment(point, a, b) < tolerance)
        }
        Shape::Text(text) => text.bounds(measure).contains(point),
        Shape::Rect(rect) => rect.as_rect().contains(point),
        Shape::Highlight(highlight) => highlight.as_rect().contains(point),
        Shape::Circle(circle) => circle.contains(point),
        Shape::Ellipse(ellipse) => ellipse.contains(point),
        Shape::Line(_)
        | Shape::Arrow(_)
        | Shape::Polygon(_)
        | Shape::RotatedHighlight(_)
        | Shape::Cross(_) => shape
            .bounds(measure)
            .inflate(OUTLINE_HIT_MARGIN, OUTLINE_HIT_MARGIN)
            .contains(point),
    }
}

/// Topmost shape under `point`, walking the scene front to back.
pub fn shape_at(scene: &Scene, point: Point, measure: &dyn TextMeasure) -> Option<ShapeId> {
    scene
        .shapes()
        .iter()
        .rev()
        .find(|shape| shape_hit(shape, point, measure))
        .map(Shape::id)
}
