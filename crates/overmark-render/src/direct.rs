//! Direct tiny-skia drawing onto the committed surface.
//!
//! Used for the pen, the eraser, selection handles, and as the fallback when
//! a shape's vector form cannot be rasterized.

use kurbo::{BezPath, PathEl, Point, Rect, Shape as _};
use overmark_core::selection::{ROTATE_HANDLE_RADIUS, resize_handles, rotate_handle_position};
use overmark_core::shapes::{SerializableColor, Shape, ShapeStyle};
use tiny_skia::{
    BlendMode, Color, FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke,
    Transform,
};

/// Selection outline and handle border color.
const SELECTION_COLOR: SerializableColor = SerializableColor { r: 59, g: 130, b: 246, a: 255 };
/// Text has no glyphs on this path; its extent is marked with a bar this
/// fraction of the font size thick.
const TEXT_BAR_RATIO: f64 = 0.1;

fn paint(color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f64) -> Stroke {
    Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

/// Convert a kurbo path into a tiny-skia path. `None` if it has no segments.
pub fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn fill_kurbo_rect(pixmap: &mut Pixmap, rect: Rect, paint: &Paint) {
    if let Some(r) = tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32) {
        pixmap.fill_rect(r, paint, Transform::identity(), None);
    }
}

fn fill_dot(pixmap: &mut Pixmap, center: Point, radius: f64, paint: &Paint) {
    if let Some(dot) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
        pixmap.fill_path(&dot, paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Stroke a single segment with round caps. A zero-length segment paints a dot.
fn stroke_line(pixmap: &mut Pixmap, from: Point, to: Point, width: f64, paint: &Paint) {
    if from == to {
        fill_dot(pixmap, from, width / 2.0, paint);
        return;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(&path, paint, &round_stroke(width), Transform::identity(), None);
    }
}

/// Draw one pen segment.
pub fn stroke_segment(pixmap: &mut Pixmap, from: Point, to: Point, style: &ShapeStyle) {
    stroke_line(pixmap, from, to, style.stroke_width, &paint(style.stroke_color));
}

/// Clear committed pixels along a segment.
pub fn erase_segment(pixmap: &mut Pixmap, from: Point, to: Point, width: f64) {
    let mut eraser = paint(SerializableColor::black());
    eraser.blend_mode = BlendMode::DestinationOut;
    stroke_line(pixmap, from, to, width, &eraser);
}

/// Draw `shape` from its own geometry with primitive fills and strokes.
pub fn draw_shape(pixmap: &mut Pixmap, shape: &Shape, text_width: f64) {
    let style = shape.style();
    match shape {
        Shape::Highlight(highlight) => {
            let color = style.stroke_color.with_opacity(highlight.opacity);
            fill_kurbo_rect(pixmap, highlight.as_rect(), &paint(color));
        }
        Shape::RotatedHighlight(highlight) => {
            let color = style.stroke_color.with_opacity(highlight.opacity);
            if let Some(path) = to_skia_path(&shape.to_path()) {
                pixmap.fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
            }
        }
        Shape::Text(text) => {
            let thickness = (text.font_size * TEXT_BAR_RATIO).max(1.0);
            let top = text.position.y + text.font_size - thickness;
            let bar = Rect::new(text.position.x, top, text.position.x + text_width, top + thickness);
            fill_kurbo_rect(pixmap, bar, &paint(style.stroke_color));
        }
        _ => {
            let Some(path) = to_skia_path(&shape.to_path()) else {
                return;
            };
            if let Some(fill) = style.fill().filter(|_| shape.is_closed()) {
                pixmap.fill_path(&path, &paint(fill), FillRule::Winding, Transform::identity(), None);
            }
            pixmap.stroke_path(
                &path,
                &paint(style.stroke_color),
                &round_stroke(style.stroke_width),
                Transform::identity(),
                None,
            );
        }
    }
}

/// Draw the selection outline, the 8 resize handles and the rotate handle.
pub fn draw_handles(pixmap: &mut Pixmap, bounds: Rect) {
    let border = paint(SELECTION_COLOR);
    let white = paint(SerializableColor::white());

    if let Some(outline) = to_skia_path(&bounds.to_path(0.1)) {
        pixmap.stroke_path(&outline, &border, &Stroke { width: 1.0, ..Stroke::default() }, Transform::identity(), None);
    }

    let rotate = rotate_handle_position(bounds);
    stroke_line(pixmap, Point::new(rotate.x, bounds.y0), rotate, 1.0, &border);
    fill_dot(pixmap, rotate, ROTATE_HANDLE_RADIUS, &white);
    if let Some(ring) = PathBuilder::from_circle(rotate.x as f32, rotate.y as f32, ROTATE_HANDLE_RADIUS as f32) {
        pixmap.stroke_path(&ring, &border, &Stroke { width: 1.5, ..Stroke::default() }, Transform::identity(), None);
    }

    for handle in resize_handles(bounds) {
        let square = handle.square();
        fill_kurbo_rect(pixmap, square, &white);
        if let Some(path) = to_skia_path(&square.to_path(0.1)) {
            pixmap.stroke_path(&path, &border, &Stroke { width: 1.5, ..Stroke::default() }, Transform::identity(), None);
        }
    }
}

/// Copy `old` into the top-left of a new pixmap of the given size.
pub fn resized(old: &Pixmap, width: u32, height: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.draw_pixmap(0, 0, old.as_ref(), &tiny_skia::PixmapPaint::default(), Transform::identity(), None);
    Some(pixmap)
}

/// Wipe every pixel to transparent.
pub fn clear(pixmap: &mut Pixmap) {
    pixmap.fill(Color::TRANSPARENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use overmark_core::shapes::{Rectangle, Text};

    fn alpha_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }

    #[test]
    fn test_erase_clears_pixels() {
        let mut pixmap = Pixmap::new(40, 40).unwrap();
        pixmap.fill(Color::from_rgba8(255, 0, 0, 255));
        erase_segment(&mut pixmap, Point::new(0.0, 20.0), Point::new(40.0, 20.0), 9.0);
        assert_eq!(alpha_at(&pixmap, 20, 20), 0);
        assert_eq!(alpha_at(&pixmap, 20, 2), 255);
    }

    #[test]
    fn test_zero_length_segment_paints_dot() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let style = ShapeStyle { stroke_width: 6.0, ..ShapeStyle::default() };
        stroke_segment(&mut pixmap, Point::new(10.0, 10.0), Point::new(10.0, 10.0), &style);
        assert!(alpha_at(&pixmap, 10, 10) > 0);
    }

    #[test]
    fn test_fallback_rect_outline() {
        let mut pixmap = Pixmap::new(60, 60).unwrap();
        let shape = Shape::Rect(Rectangle::new(Point::new(10.0, 10.0), 40.0, 30.0));
        draw_shape(&mut pixmap, &shape, 0.0);
        assert!(alpha_at(&pixmap, 10, 25) > 0);
        assert_eq!(alpha_at(&pixmap, 30, 25), 0);
    }

    #[test]
    fn test_fallback_text_marks_extent() {
        let mut pixmap = Pixmap::new(100, 40).unwrap();
        let shape = Shape::Text(Text::new(Point::new(10.0, 5.0), "hello".to_string()));
        draw_shape(&mut pixmap, &shape, 50.0);
        assert!(alpha_at(&pixmap, 30, 24) > 0);
        assert_eq!(alpha_at(&pixmap, 80, 24), 0);
    }

    #[test]
    fn test_resized_keeps_overlap() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        pixmap.fill(Color::from_rgba8(0, 255, 0, 255));
        let bigger = resized(&pixmap, 20, 20).unwrap();
        assert_eq!(alpha_at(&bigger, 5, 5), 255);
        assert_eq!(alpha_at(&bigger, 15, 15), 0);
        assert!(resized(&pixmap, 0, 10).is_none());
    }

    #[test]
    fn test_handles_drawn_at_corners() {
        let mut pixmap = Pixmap::new(80, 80).unwrap();
        draw_handles(&mut pixmap, Rect::new(20.0, 40.0, 60.0, 70.0));
        assert_eq!(alpha_at(&pixmap, 60, 70), 255);
        assert_eq!(alpha_at(&pixmap, 40, 10), 255);
    }
}
