//! Geometry kernel: pure helpers shared by hit-testing, transforms and rendering.

use kurbo::{Point, Rect, Vec2};

/// Distance from a point to the line segment `a`→`b`.
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to the nearest endpoint.
pub fn distance_point_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Rotate `point` about `center` by `angle` radians (clockwise on a y-down surface).
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    Point::new(
        center.x + d.x * cos - d.y * sin,
        center.y + d.x * sin + d.y * cos,
    )
}

/// Axis-aligned bounds of a point set. Empty input yields `Rect::ZERO`.
pub fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |rect, p| {
            rect.union_pt(*p)
        })
}

/// Angle swept from `start` to `current` as seen from `center`.
pub fn sweep_angle(center: Point, start: Point, current: Point) -> f64 {
    let from: Vec2 = start - center;
    let to: Vec2 = current - center;
    to.atan2() - from.atan2()
}

/// Ratio of a new extent to an original one, defaulting to 1 for degenerate originals.
pub fn scale_ratio(new: f64, original: f64) -> f64 {
    if original.abs() < f64::EPSILON {
        1.0
    } else {
        new / original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_segment_distance_projection() {
        let d = distance_point_to_segment(
            Point::new(50.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_distance_clamped() {
        let d = distance_point_to_segment(
            Point::new(103.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_distance_degenerate() {
        let p = Point::new(3.0, 4.0);
        let d = distance_point_to_segment(p, Point::ZERO, Point::ZERO);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_point(Point::new(10.0, 0.0), Point::ZERO, FRAC_PI_2);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_inverse() {
        let center = Point::new(12.0, -3.0);
        let p = Point::new(40.0, 17.0);
        let back = rotate_point(rotate_point(p, center, 1.1), center, -1.1);
        assert!((back - p).hypot() < 1e-9);
    }

    #[test]
    fn test_rotate_full_turn_is_identity() {
        let center = Point::new(5.0, 5.0);
        let p = Point::new(-7.0, 2.5);
        let q = rotate_point(p, center, 2.0 * PI);
        assert!((q - p).hypot() < 1e-9);
    }

    #[test]
    fn test_points_bounds() {
        let bounds = points_bounds(&[
            Point::new(5.0, 9.0),
            Point::new(-2.0, 3.0),
            Point::new(8.0, 4.0),
        ]);
        assert_eq!(bounds, Rect::new(-2.0, 3.0, 8.0, 9.0));
        assert_eq!(points_bounds(&[]), Rect::ZERO);
    }

    #[test]
    fn test_sweep_angle() {
        let angle = sweep_angle(Point::ZERO, Point::new(0.0, -10.0), Point::new(10.0, 0.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn test_scale_ratio_degenerate() {
        assert!((scale_ratio(20.0, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((scale_ratio(20.0, 10.0) - 2.0).abs() < f64::EPSILON);
    }
}
