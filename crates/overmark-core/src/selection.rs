//! Selection handles around a shape's bounding box.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Side length of a square resize handle.
pub const HANDLE_SIZE: f64 = 12.0;
/// Distance of the rotate handle above the top edge.
pub const ROTATE_HANDLE_OFFSET: f64 = 30.0;
/// Drawn radius of the rotate handle.
pub const ROTATE_HANDLE_RADIUS: f64 = 6.0;
/// Hit radius of the rotate handle.
pub const ROTATE_HANDLE_HIT_RADIUS: f64 = 12.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle.
    Corner(Corner),
    /// Edge midpoint handle.
    Edge(Edge),
    /// Rotation handle (positioned above the shape).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleKind {
    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::BottomLeft) | HandleKind::Edge(Edge::Left)
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopRight | Corner::BottomRight) | HandleKind::Edge(Edge::Right)
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::TopLeft | Corner::TopRight) | HandleKind::Edge(Edge::Top)
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            HandleKind::Corner(Corner::BottomLeft | Corner::BottomRight) | HandleKind::Edge(Edge::Bottom)
        )
    }
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Center of the handle.
    pub position: Point,
    /// Handle type.
    pub kind: HandleKind,
}

impl Handle {
    /// Create a new handle.
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Resize handles hit within their square, the rotate handle within
    /// its hit radius.
    pub fn hit_test(&self, point: Point) -> bool {
        match self.kind {
            HandleKind::Rotate => point.distance(self.position) <= ROTATE_HANDLE_HIT_RADIUS,
            _ => {
                let half = HANDLE_SIZE / 2.0;
                (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
            }
        }
    }

    /// Square drawn for a resize handle.
    pub fn square(&self) -> Rect {
        Rect::from_center_size(self.position, (HANDLE_SIZE, HANDLE_SIZE))
    }
}

/// Center of the rotate handle for a bounding box.
pub fn rotate_handle_position(bounds: Rect) -> Point {
    Point::new(bounds.center().x, bounds.y0 - ROTATE_HANDLE_OFFSET)
}

/// The 8 resize handles (corners, then edge midpoints).
pub fn resize_handles(bounds: Rect) -> [Handle; 8] {
    let mid_x = bounds.center().x;
    let mid_y = bounds.center().y;
    [
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(Point::new(mid_x, bounds.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(bounds.x1, mid_y), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(mid_x, bounds.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(bounds.x0, mid_y), HandleKind::Edge(Edge::Left)),
    ]
}

/// All 9 handles, rotate handle first.
pub fn handles(bounds: Rect) -> Vec<Handle> {
    let mut handles = Vec::with_capacity(9);
    handles.push(Handle::new(rotate_handle_position(bounds), HandleKind::Rotate));
    handles.extend(resize_handles(bounds));
    handles
}

/// First handle under `point`. The rotate handle is tested before the
/// resize handles.
pub fn handle_at(point: Point, bounds: Rect) -> Option<HandleKind> {
    handles(bounds)
        .into_iter()
        .find(|h| h.hit_test(point))
        .map(|h| h.kind)
}
