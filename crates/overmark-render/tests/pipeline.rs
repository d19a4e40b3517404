use kurbo::Point;
use overmark_core::shapes::Text;
use overmark_core::{Engine, KeyEvent, PointerEvent, SerializableColor, ToolKind};
use overmark_render::{RenderError, RenderPipeline, RenderResult, ResvgRasterizer, VectorRasterizer};
use tiny_skia::{Pixmap, PixmapMut};

/// Rasterizer that always fails to decode.
struct BrokenRasterizer;

impl VectorRasterizer for BrokenRasterizer {
    fn rasterize(&self, _svg: &str, _target: &mut PixmapMut) -> RenderResult<()> {
        Err(RenderError::SvgParse("unsupported".to_string()))
    }

    fn text_width(&self, _text: &Text) -> Option<f64> {
        None
    }
}

fn engine() -> Engine<RenderPipeline> {
    let pipeline = RenderPipeline::with_rasterizer(120, 100, ResvgRasterizer::without_fonts()).unwrap();
    Engine::new(pipeline)
}

fn drag<S: overmark_core::Surface>(engine: &mut Engine<S>, from: (f64, f64), to: (f64, f64)) {
    let mid = Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
    engine.handle_pointer(PointerEvent::Down { position: Point::new(from.0, from.1) });
    engine.handle_pointer(PointerEvent::Move { position: mid });
    engine.handle_pointer(PointerEvent::Up { position: Point::new(to.0, to.1) });
}

fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
    let p = pixmap.pixel(x, y).unwrap().demultiply();
    (p.red(), p.green(), p.blue(), p.alpha())
}

fn alpha(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
    pixmap.pixel(x, y).unwrap().alpha()
}

#[test]
fn test_committed_rectangle_pixels() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Rectangle);
    engine.set_stroke_color(SerializableColor::new(255, 0, 0, 255));
    engine.set_stroke_width(4.0);
    drag(&mut engine, (10.0, 10.0), (50.0, 40.0));

    let committed = engine.surface().committed();
    assert_eq!(rgba(committed, 10, 25), (255, 0, 0, 255));
    assert_eq!(alpha(committed, 30, 25), 0);
    assert!(engine.surface().preview().is_empty());
}

#[test]
fn test_preview_not_committed_mid_gesture() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Line);
    engine.set_stroke_width(6.0);
    engine.handle_pointer(PointerEvent::Down { position: Point::new(10.0, 50.0) });
    engine.handle_pointer(PointerEvent::Move { position: Point::new(100.0, 50.0) });

    let surface = engine.surface();
    assert_eq!(alpha(surface.committed(), 50, 50), 0);
    assert!(alpha(&surface.frame().unwrap(), 50, 50) > 0);

    engine.handle_pointer(PointerEvent::Up { position: Point::new(100.0, 50.0) });
    assert!(alpha(engine.surface().committed(), 50, 50) > 0);
}

#[test]
fn test_commit_preserves_prior_content() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Line);
    engine.set_stroke_width(4.0);
    drag(&mut engine, (10.0, 20.0), (110.0, 20.0));
    drag(&mut engine, (10.0, 80.0), (110.0, 80.0));
    let committed = engine.surface().committed();
    assert!(alpha(committed, 60, 20) > 0);
    assert!(alpha(committed, 60, 80) > 0);
}

#[test]
fn test_move_redraws_scene() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Highlight);
    engine.set_stroke_color(SerializableColor::new(0, 0, 255, 255));
    drag(&mut engine, (10.0, 10.0), (30.0, 30.0));
    assert!(alpha(engine.surface().committed(), 20, 20) > 0);

    engine.set_tool(ToolKind::Move);
    drag(&mut engine, (20.0, 20.0), (80.0, 60.0));
    engine.handle_key(&KeyEvent::Pressed("Escape".to_string()));

    let committed = engine.surface().committed();
    assert_eq!(alpha(committed, 20, 20), 0);
    assert!(alpha(committed, 80, 60) > 0);
}

#[test]
fn test_handles_drawn_while_selected() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Rectangle);
    drag(&mut engine, (20.0, 40.0), (60.0, 70.0));
    engine.set_tool(ToolKind::Move);
    engine.handle_pointer(PointerEvent::Down { position: Point::new(40.0, 55.0) });
    engine.handle_pointer(PointerEvent::Up { position: Point::new(40.0, 55.0) });

    // Rotate handle sits above the top edge, on an otherwise empty area.
    assert!(alpha(engine.surface().committed(), 40, 10) > 0);

    engine.handle_key(&KeyEvent::Pressed("Escape".to_string()));
    assert_eq!(alpha(engine.surface().committed(), 40, 10), 0);
}

#[test]
fn test_eraser_is_raster_only() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Highlight);
    drag(&mut engine, (0.0, 0.0), (120.0, 100.0));
    engine.set_tool(ToolKind::Eraser);
    engine.set_stroke_width(5.0);
    drag(&mut engine, (0.0, 50.0), (120.0, 50.0));

    assert_eq!(alpha(engine.surface().committed(), 60, 50), 0);
    assert!(alpha(engine.surface().committed(), 60, 10) > 0);
    assert_eq!(engine.scene().len(), 1);
}

#[test]
fn test_pen_draws_without_preview() {
    let mut engine = engine();
    engine.set_stroke_width(5.0);
    engine.handle_pointer(PointerEvent::Down { position: Point::new(10.0, 10.0) });
    engine.handle_pointer(PointerEvent::Move { position: Point::new(60.0, 10.0) });
    assert!(alpha(engine.surface().committed(), 30, 10) > 0);
    assert!(engine.surface().preview().is_empty());
    engine.handle_pointer(PointerEvent::Up { position: Point::new(60.0, 10.0) });
    assert_eq!(engine.scene().len(), 1);
}

#[test]
fn test_fallback_when_rasterizer_fails() {
    let pipeline = RenderPipeline::with_rasterizer(120, 100, BrokenRasterizer).unwrap();
    let mut engine = Engine::new(pipeline);
    engine.set_tool(ToolKind::Rectangle);
    engine.set_stroke_color(SerializableColor::new(0, 128, 0, 255));
    engine.set_stroke_width(4.0);
    drag(&mut engine, (10.0, 10.0), (50.0, 40.0));

    assert_eq!(engine.scene().len(), 1);
    assert_eq!(rgba(engine.surface().committed(), 10, 25), (0, 128, 0, 255));
    assert!(engine.surface().frame().is_ok());
}

#[test]
fn test_clear_all_wipes_surface() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Rectangle);
    drag(&mut engine, (10.0, 10.0), (50.0, 40.0));
    engine.clear_all();
    assert!(engine.surface().committed().pixels().iter().all(|p| p.alpha() == 0));
}

#[test]
fn test_resize_keeps_pixels() {
    let mut engine = engine();
    engine.set_tool(ToolKind::Highlight);
    drag(&mut engine, (0.0, 0.0), (40.0, 40.0));
    engine.resize_surface(200, 150);
    let surface = engine.surface();
    assert_eq!((surface.width(), surface.height()), (200, 150));
    assert!(alpha(surface.committed(), 20, 20) > 0);
    assert_eq!(alpha(surface.committed(), 150, 120), 0);
}

#[test]
fn test_zero_size_surface_rejected() {
    assert!(matches!(
        RenderPipeline::with_rasterizer(0, 10, ResvgRasterizer::without_fonts()),
        Err(RenderError::SurfaceAlloc { width: 0, height: 10 })
    ));
}
