//! Move, resize and rotate of a single selected shape.
//!
//! Every frame is computed from the snapshot taken when the gesture started,
//! so intermediate frames never accumulate rounding error.

use crate::geometry::{scale_ratio, sweep_angle};
use crate::selection::HandleKind;
use crate::shapes::{Shape, ShapeId};
use crate::surface::TextMeasure;
use kurbo::{Point, Rect, Vec2};

/// Smallest width or height a resize can produce.
pub const MIN_BOX_SIZE: f64 = 10.0;
/// Smallest font size a text resize can produce.
pub const MIN_FONT_SIZE: f64 = 8.0;

/// Active transform submode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformMode {
    #[default]
    Idle,
    Move,
    Resize(HandleKind),
    Rotate,
}

/// Per-gesture record of the shape being transformed.
#[derive(Debug, Clone)]
pub struct TransformSession {
    /// Shape being transformed.
    pub shape_id: ShapeId,
    /// Value copy of the shape at gesture start. Never mutated.
    pub original: Shape,
    /// Pointer position at gesture start.
    pub start_point: Point,
    /// Bounds of `original`.
    pub original_bounds: Rect,
    /// Grabbed handle, `None` for a plain move.
    pub handle: Option<HandleKind>,
}

impl TransformSession {
    pub fn new(original: Shape, original_bounds: Rect, start_point: Point, handle: Option<HandleKind>) -> Self {
        Self {
            shape_id: original.id(),
            original,
            start_point,
            original_bounds,
            handle,
        }
    }

    pub fn mode(&self) -> TransformMode {
        match self.handle {
            None => TransformMode::Move,
            Some(HandleKind::Rotate) => TransformMode::Rotate,
            Some(handle) => TransformMode::Resize(handle),
        }
    }

    /// Geometry of the shape with the pointer at `pointer`.
    pub fn apply(&self, pointer: Point, measure: &dyn TextMeasure) -> Shape {
        let delta = pointer - self.start_point;
        match self.mode() {
            TransformMode::Idle => self.original.clone(),
            TransformMode::Move => self.original.translated(delta),
            TransformMode::Resize(handle) => {
                let new_box = resize_box(self.original_bounds, handle, delta);
                resize_shape(&self.original, self.original_bounds, new_box)
            }
            TransformMode::Rotate => {
                let pivot = self.original_bounds.center();
                let angle = sweep_angle(pivot, self.start_point, pointer);
                self.original.rotated(angle, pivot, measure)
            }
        }
    }
}

/// Move the edges `handle` controls by `delta`, keeping the opposite edges
/// fixed and never shrinking below [`MIN_BOX_SIZE`].
pub fn resize_box(bounds: Rect, handle: HandleKind, delta: Vec2) -> Rect {
    let mut b = bounds;
    if handle.moves_left() {
        b.x0 = (bounds.x0 + delta.x).min(bounds.x1 - MIN_BOX_SIZE);
    }
    if handle.moves_right() {
        b.x1 = (bounds.x1 + delta.x).max(bounds.x0 + MIN_BOX_SIZE);
    }
    if handle.moves_top() {
        b.y0 = (bounds.y0 + delta.y).min(bounds.y1 - MIN_BOX_SIZE);
    }
    if handle.moves_bottom() {
        b.y1 = (bounds.y1 + delta.y).max(bounds.y0 + MIN_BOX_SIZE);
    }
    b
}

/// Reproject `original` from `old_box` into `new_box`.
pub fn resize_shape(original: &Shape, old_box: Rect, new_box: Rect) -> Shape {
    let sx = scale_ratio(new_box.width(), old_box.width());
    let sy = scale_ratio(new_box.height(), old_box.height());
    let map = |p: &mut Point| {
        *p = new_box.origin() + Vec2::new((p.x - old_box.x0) * sx, (p.y - old_box.y0) * sy);
    };

    let mut shape = original.clone();
    match &mut shape {
        Shape::Rect(rect) => rect.set_rect(new_box),
        Shape::Highlight(highlight) => highlight.set_rect(new_box),
        Shape::Circle(circle) => {
            circle.center = new_box.center();
            circle.radius = new_box.width().max(new_box.height()) / 2.0;
        }
        Shape::Ellipse(ellipse) => {
            ellipse.center = new_box.center();
            ellipse.radius_x = new_box.width() / 2.0;
            ellipse.radius_y = new_box.height() / 2.0;
        }
        Shape::Cross(cross) => {
            cross.center = new_box.center();
            cross.width = new_box.width();
            cross.height = new_box.height();
        }
        Shape::Text(text) => {
            text.position = new_box.origin();
            text.font_size = (text.font_size * sx.max(sy)).max(MIN_FONT_SIZE);
        }
        Shape::Line(line) => {
            map(&mut line.start);
            map(&mut line.end);
        }
        Shape::Arrow(arrow) => {
            map(&mut arrow.start);
            map(&mut arrow.end);
        }
        Shape::Path(path) => path.points.iter_mut().for_each(map),
        Shape::Polygon(polygon) => polygon.points.iter_mut().for_each(map),
        Shape::RotatedHighlight(highlight) => highlight.points.iter_mut().for_each(map),
    }
    shape
}
