//! Gesture state machine driving the scene and the render surface.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::input::{KeyEvent, PointerEvent};
use crate::scene::Scene;
use crate::selection::{HandleKind, handle_at};
use crate::shapes::{SerializableColor, Shape, ShapeId, Text};
use crate::surface::Surface;
use crate::tools::{StyleSettings, ToolKind, ToolManager};
use crate::transform::{TransformMode, TransformSession};
use kurbo::{Point, Rect};
use log::{debug, info, warn};

/// Requests the engine hands back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineRequest {
    /// Open a text input at `position`; answer with [`Engine::commit_text`].
    TextInput { position: Point, font_size: f64 },
    /// Sample a color from the screen; answer with [`Engine::resolve_color_sample`].
    ColorSample,
}

/// Host response to [`EngineRequest::ColorSample`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSampleResult {
    Picked(SerializableColor),
    /// The user dismissed the sampler.
    Aborted,
    Failed(String),
}

/// Cursor the host should show at a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Crosshair,
    Text,
    Move,
    Rotate,
    Resize(HandleKind),
    Wait,
}

/// What the current pointer-down started.
#[derive(Debug, Clone)]
enum GestureState {
    Idle,
    /// A shape tool is dragging out a preview.
    Drawing,
    /// The pen is stroking straight onto the committed surface.
    Freehand { last: Point },
    Erasing { last: Point },
    Transform(TransformSession),
}

/// The annotation engine: owns the scene, the selection and the surface.
pub struct Engine<S: Surface> {
    config: EngineConfig,
    scene: Scene,
    tools: ToolManager,
    selection: Option<ShapeId>,
    gesture: GestureState,
    surface: S,
    /// Tool to restore when the move override key is released.
    override_tool: Option<ToolKind>,
    color_sample_pending: bool,
    last_pointer: Point,
}

impl<S: Surface> Engine<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, EngineConfig::default())
    }

    pub fn with_config(surface: S, config: EngineConfig) -> Self {
        let mut tools = ToolManager::new();
        tools.highlight_opacity = config.highlight_opacity;
        Self {
            config,
            scene: Scene::new(),
            tools,
            selection: None,
            gesture: GestureState::Idle,
            surface,
            override_tool: None,
            color_sample_pending: false,
            last_pointer: Point::ZERO,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the engine and hand back its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn style(&self) -> &StyleSettings {
        &self.tools.style
    }

    pub fn selection(&self) -> Option<ShapeId> {
        self.selection
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selection.and_then(|id| self.scene.get_shape(id))
    }

    pub fn is_color_sample_pending(&self) -> bool {
        self.color_sample_pending
    }

    pub fn is_gesture_active(&self) -> bool {
        !matches!(self.gesture, GestureState::Idle)
    }

    /// Submode of the transform in progress, `Idle` if none.
    pub fn transform_mode(&self) -> TransformMode {
        match &self.gesture {
            GestureState::Transform(session) => session.mode(),
            _ => TransformMode::Idle,
        }
    }

    /// Topmost shape under `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.scene.shape_at(point, &self.surface)
    }

    // --- Host settings ---

    /// Switch tools. Any gesture in progress is abandoned; leaving the move
    /// tool drops the selection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.abort_gesture();
        self.override_tool = None;
        self.switch_tool(tool);
    }

    pub fn set_stroke_color(&mut self, color: impl Into<SerializableColor>) {
        self.tools.style.stroke_color = color.into();
    }

    /// Set the stroke width, clamped to 1..=50.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.tools.style.set_stroke_width(width);
    }

    pub fn set_fill_color(&mut self, color: Option<SerializableColor>) {
        self.tools.style.fill_color = color;
    }

    pub fn set_fill_enabled(&mut self, enabled: bool) {
        self.tools.style.fill_enabled = enabled;
    }

    // --- Input ---

    /// Feed one pointer event. Returns a request when the host has to act.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<EngineRequest> {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => {
                self.pointer_move(position);
                None
            }
            PointerEvent::Up { position } => {
                if self.is_gesture_active() && position != self.last_pointer {
                    self.pointer_move(position);
                }
                self.finish_gesture();
                None
            }
            PointerEvent::Leave => {
                self.finish_gesture();
                None
            }
        }
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) if *key == self.config.cancel_key => self.cancel(),
            KeyEvent::Pressed(key) if *key == self.config.move_override_key => {
                if self.override_tool.is_none()
                    && !self.is_gesture_active()
                    && self.tools.current_tool != ToolKind::Move
                {
                    debug!("Move override on (was {:?})", self.tools.current_tool);
                    self.override_tool = Some(self.tools.current_tool);
                    self.switch_tool(ToolKind::Move);
                }
            }
            KeyEvent::Released(key) if *key == self.config.move_override_key => {
                if let Some(previous) = self.override_tool.take() {
                    debug!("Move override off, back to {:?}", previous);
                    self.finish_gesture();
                    self.switch_tool(previous);
                }
            }
            _ => {}
        }
    }

    /// Drop the selection and abandon the gesture in progress without
    /// committing anything.
    pub fn cancel(&mut self) {
        let had_selection = self.selection.take().is_some();
        let redrawn = self.abort_gesture();
        if had_selection && !redrawn {
            self.redraw();
        }
    }

    /// Remove every shape and wipe the committed surface.
    pub fn clear_all(&mut self) {
        info!("Clearing {} shapes", self.scene.len());
        self.tools.cancel();
        self.gesture = GestureState::Idle;
        self.selection = None;
        self.scene.clear();
        self.surface.clear();
    }

    /// Commit text typed into the host's overlay. Blank content is ignored.
    pub fn commit_text(&mut self, position: Point, content: &str) -> Option<ShapeId> {
        if content.trim().is_empty() {
            return None;
        }
        let mut text = Text::new(position, content.to_string());
        text.font_size = self.text_font_size();
        text.font_family = self.config.font_family;
        text.font_weight = self.config.font_weight;
        text.style = self.tools.style.shape_style();
        let shape = Shape::Text(text);
        self.surface.commit(&shape);
        let id = self.scene.add_shape(shape);
        debug!("Committed text {} at ({}, {})", id, position.x, position.y);
        Some(id)
    }

    /// Start a color sample. Drawing is suspended until it resolves.
    pub fn request_color_sample(&mut self) -> EngineResult<EngineRequest> {
        if self.color_sample_pending {
            return Err(EngineError::ColorSampleInProgress);
        }
        self.abort_gesture();
        self.color_sample_pending = true;
        debug!("Color sample requested");
        Ok(EngineRequest::ColorSample)
    }

    /// Apply the host's answer to an outstanding color sample.
    pub fn resolve_color_sample(&mut self, result: ColorSampleResult) -> EngineResult<()> {
        if !self.color_sample_pending {
            warn!("Color sample result with no request pending: {:?}", result);
            return Err(EngineError::NoColorSamplePending);
        }
        self.color_sample_pending = false;
        match result {
            ColorSampleResult::Picked(color) => {
                debug!("Picked color {}", color);
                self.tools.style.stroke_color = color;
                self.set_tool(ToolKind::Pen);
            }
            ColorSampleResult::Aborted => debug!("Color sample aborted"),
            ColorSampleResult::Failed(reason) => warn!("Color sample failed: {}", reason),
        }
        Ok(())
    }

    pub fn cursor_hint(&self, point: Point) -> CursorHint {
        if self.color_sample_pending {
            return CursorHint::Wait;
        }
        match self.tools.current_tool {
            ToolKind::Text => CursorHint::Text,
            ToolKind::Move => {
                if let Some(bounds) = self.handle_bounds() {
                    match handle_at(point, bounds) {
                        Some(HandleKind::Rotate) => return CursorHint::Rotate,
                        Some(handle) => return CursorHint::Resize(handle),
                        None => {}
                    }
                }
                if self.shape_at(point).is_some() {
                    CursorHint::Move
                } else {
                    CursorHint::Default
                }
            }
            _ => CursorHint::Crosshair,
        }
    }

    /// Reallocate the committed surface, keeping what is already drawn.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        debug!("Resizing surface to {}x{}", width, height);
        self.surface.resize(width, height);
    }

    /// Re-rasterize the whole scene.
    pub fn redraw(&mut self) {
        let handles = self.handle_bounds();
        self.surface.redraw(&self.scene, handles);
    }

    // --- Gesture internals ---

    fn pointer_down(&mut self, position: Point) -> Option<EngineRequest> {
        if self.color_sample_pending {
            return None;
        }
        if self.is_gesture_active() {
            self.finish_gesture();
        }
        self.last_pointer = position;

        let tool = self.tools.current_tool;
        match tool {
            ToolKind::Pen => {
                self.tools.begin(position);
                self.gesture = GestureState::Freehand { last: position };
            }
            ToolKind::Eraser => self.gesture = GestureState::Erasing { last: position },
            ToolKind::Move => self.begin_transform(position),
            ToolKind::Text => {
                return Some(EngineRequest::TextInput {
                    position,
                    font_size: self.text_font_size(),
                });
            }
            ToolKind::Picker => return self.request_color_sample().ok(),
            _ => {
                self.tools.begin(position);
                self.gesture = GestureState::Drawing;
            }
        }
        debug!("Gesture start {:?} at ({}, {})", tool, position.x, position.y);
        None
    }

    fn pointer_move(&mut self, position: Point) {
        self.last_pointer = position;
        match &mut self.gesture {
            GestureState::Idle => {}
            GestureState::Drawing => {
                self.tools.update(position);
                let preview = self.tools.preview_shape();
                self.surface.set_preview(preview.as_ref());
            }
            GestureState::Freehand { last } => {
                self.tools.update(position);
                self.surface
                    .stroke_segment(*last, position, &self.tools.style.shape_style());
                *last = position;
            }
            GestureState::Erasing { last } => {
                let width = self.tools.style.stroke_width() * self.config.eraser_width_multiplier;
                self.surface.erase_segment(*last, position, width);
                *last = position;
            }
            GestureState::Transform(session) => {
                let shape = session.apply(position, &self.surface);
                let id = session.shape_id;
                self.scene.replace_shape(id, shape);
                self.redraw();
            }
        }
    }

    fn begin_transform(&mut self, position: Point) {
        if let Some(selected) = self.selected_shape().cloned() {
            let bounds = selected.bounds(&self.surface);
            if let Some(handle) = handle_at(position, bounds) {
                debug!("Grabbed {:?} on {}", handle, selected.id());
                let session = TransformSession::new(selected, bounds, position, Some(handle));
                self.gesture = GestureState::Transform(session);
                return;
            }
        }

        let hit = self.shape_at(position).and_then(|id| self.scene.get_shape(id)).cloned();
        match hit {
            Some(shape) => {
                debug!("Selected {:?} {}", shape.kind(), shape.id());
                self.selection = Some(shape.id());
                let bounds = shape.bounds(&self.surface);
                self.gesture =
                    GestureState::Transform(TransformSession::new(shape, bounds, position, None));
                self.redraw();
            }
            None => {
                if self.selection.take().is_some() {
                    debug!("Selection cleared");
                    self.redraw();
                }
            }
        }
    }

    fn finish_gesture(&mut self) {
        match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Idle | GestureState::Erasing { .. } => {}
            GestureState::Drawing => {
                self.surface.set_preview(None);
                if let Some(shape) = self.tools.end() {
                    debug!("Committed {:?} {}", shape.kind(), shape.id());
                    self.surface.commit(&shape);
                    self.scene.add_shape(shape);
                }
            }
            GestureState::Freehand { .. } => {
                // Already on the committed surface.
                if let Some(shape) = self.tools.end() {
                    debug!("Committed pen stroke {}", shape.id());
                    self.scene.add_shape(shape);
                }
            }
            GestureState::Transform(session) => {
                debug!("Transform {:?} of {} done", session.mode(), session.shape_id);
                self.redraw();
            }
        }
    }

    /// Abandon the gesture in progress. Returns true if the surface was
    /// fully redrawn.
    fn abort_gesture(&mut self) -> bool {
        match std::mem::replace(&mut self.gesture, GestureState::Idle) {
            GestureState::Idle | GestureState::Erasing { .. } => false,
            GestureState::Drawing => {
                self.tools.cancel();
                self.surface.set_preview(None);
                false
            }
            GestureState::Freehand { .. } => {
                self.tools.cancel();
                self.redraw();
                true
            }
            GestureState::Transform(session) => {
                debug!("Transform of {} cancelled", session.shape_id);
                self.scene.replace_shape(session.shape_id, session.original);
                self.redraw();
                true
            }
        }
    }

    fn switch_tool(&mut self, tool: ToolKind) {
        let had_handles = self.handle_bounds().is_some();
        self.tools.set_tool(tool);
        if tool != ToolKind::Move && self.override_tool.is_none() {
            self.selection = None;
        }
        if had_handles != self.handle_bounds().is_some() {
            self.redraw();
        }
    }

    /// Bounds to draw handles around: the selection, while moving.
    fn handle_bounds(&self) -> Option<Rect> {
        if self.tools.current_tool != ToolKind::Move {
            return None;
        }
        self.selected_shape().map(|shape| shape.bounds(&self.surface))
    }

    fn text_font_size(&self) -> f64 {
        self.tools.style.stroke_width() * self.config.text_size_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Corner;
    use crate::shapes::{ShapeKind, ShapeStyle};
    use crate::surface::{ApproximateTextMeasure, TextMeasure};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Preview(Option<ShapeKind>),
        Commit(ShapeKind),
        Redraw { shapes: usize, handles: Option<Rect> },
        Stroke,
        Erase(f64),
        Clear,
        Resize(u32, u32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl RecordingSurface {
        fn take(&mut self) -> Vec<Call> {
            std::mem::take(&mut self.calls)
        }
    }

    impl TextMeasure for RecordingSurface {
        fn text_width(&self, text: &Text) -> f64 {
            ApproximateTextMeasure.text_width(text)
        }
    }

    impl Surface for RecordingSurface {
        fn set_preview(&mut self, shape: Option<&Shape>) {
            self.calls.push(Call::Preview(shape.map(Shape::kind)));
        }

        fn commit(&mut self, shape: &Shape) {
            self.calls.push(Call::Commit(shape.kind()));
        }

        fn redraw(&mut self, scene: &Scene, handles: Option<Rect>) {
            self.calls.push(Call::Redraw { shapes: scene.len(), handles });
        }

        fn stroke_segment(&mut self, _from: Point, _to: Point, _style: &ShapeStyle) {
            self.calls.push(Call::Stroke);
        }

        fn erase_segment(&mut self, _from: Point, _to: Point, width: f64) {
            self.calls.push(Call::Erase(width));
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.calls.push(Call::Resize(width, height));
        }
    }

    fn engine() -> Engine<RecordingSurface> {
        Engine::new(RecordingSurface::default())
    }

    fn drag(engine: &mut Engine<RecordingSurface>, from: Point, via: Point, to: Point) -> Option<EngineRequest> {
        let request = engine.handle_pointer(PointerEvent::Down { position: from });
        engine.handle_pointer(PointerEvent::Move { position: via });
        engine.handle_pointer(PointerEvent::Up { position: to });
        request
    }

    fn engine_with_rect() -> (Engine<RecordingSurface>, ShapeId) {
        let mut engine = engine();
        engine.set_tool(ToolKind::Rectangle);
        drag(&mut engine, Point::new(10.0, 10.0), Point::new(30.0, 20.0), Point::new(50.0, 40.0));
        let id = engine.scene().shapes()[0].id();
        engine.set_tool(ToolKind::Move);
        // Click inside to select without moving.
        engine.handle_pointer(PointerEvent::Down { position: Point::new(30.0, 25.0) });
        engine.handle_pointer(PointerEvent::Up { position: Point::new(30.0, 25.0) });
        engine.surface_mut().take();
        (engine, id)
    }

    #[test]
    fn test_draw_rectangle() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Rectangle);
        drag(&mut engine, Point::new(10.0, 10.0), Point::new(30.0, 20.0), Point::new(50.0, 40.0));

        assert_eq!(engine.scene().len(), 1);
        let Shape::Rect(rect) = &engine.scene().shapes()[0] else {
            panic!("expected rect");
        };
        assert_eq!(rect.as_rect(), Rect::new(10.0, 10.0, 50.0, 40.0));
        assert_eq!(
            engine.surface_mut().take(),
            vec![
                Call::Preview(Some(ShapeKind::Rect)),
                Call::Preview(Some(ShapeKind::Rect)),
                Call::Preview(None),
                Call::Commit(ShapeKind::Rect),
            ]
        );
    }

    #[test]
    fn test_click_without_drag_commits_nothing() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Line);
        engine.handle_pointer(PointerEvent::Down { position: Point::new(10.0, 10.0) });
        engine.handle_pointer(PointerEvent::Up { position: Point::new(10.0, 10.0) });
        assert!(engine.scene().is_empty());
        assert!(!engine.surface().calls.contains(&Call::Commit(ShapeKind::Line)));
    }

    #[test]
    fn test_resize_south_east() {
        let (mut engine, id) = engine_with_rect();
        assert_eq!(engine.selection(), Some(id));

        engine.handle_pointer(PointerEvent::Down { position: Point::new(50.0, 40.0) });
        assert_eq!(
            engine.transform_mode(),
            TransformMode::Resize(HandleKind::Corner(Corner::BottomRight))
        );
        engine.handle_pointer(PointerEvent::Move { position: Point::new(60.0, 50.0) });
        engine.handle_pointer(PointerEvent::Up { position: Point::new(70.0, 60.0) });
        assert_eq!(engine.transform_mode(), TransformMode::Idle);

        let Some(Shape::Rect(rect)) = engine.scene().get_shape(id) else {
            panic!("expected rect");
        };
        assert_eq!(rect.as_rect(), Rect::new(10.0, 10.0, 70.0, 60.0));
        // Every transform frame is a full redraw with handles on top.
        let calls = engine.surface_mut().take();
        assert!(!calls.is_empty());
        assert!(calls.iter().all(|c| matches!(c, Call::Redraw { shapes: 1, handles: Some(_) })));
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let (mut engine, id) = engine_with_rect();
        engine.handle_pointer(PointerEvent::Down { position: Point::new(30.0, -20.0) });
        assert_eq!(engine.transform_mode(), TransformMode::Rotate);
        engine.handle_pointer(PointerEvent::Move { position: Point::new(60.0, -5.0) });
        engine.handle_pointer(PointerEvent::Up { position: Point::new(75.0, 25.0) });

        let shape = engine.scene().get_shape(id).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Polygon);
        let bounds = shape.bounds(&ApproximateTextMeasure);
        assert!((bounds.width() - 30.0).abs() < 1e-9);
        assert!((bounds.height() - 40.0).abs() < 1e-9);
        assert_eq!(engine.scene().index_of(id), Some(0));
    }

    #[test]
    fn test_move_selected_shape() {
        let (mut engine, id) = engine_with_rect();
        drag(&mut engine, Point::new(30.0, 25.0), Point::new(35.0, 25.0), Point::new(40.0, 35.0));
        let Some(Shape::Rect(rect)) = engine.scene().get_shape(id) else {
            panic!("expected rect");
        };
        assert_eq!(rect.position, Point::new(20.0, 20.0));
    }

    #[test]
    fn test_overlapping_circles_pick_latest() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Circle);
        drag(&mut engine, Point::new(50.0, 50.0), Point::new(70.0, 50.0), Point::new(80.0, 50.0));
        drag(&mut engine, Point::new(90.0, 50.0), Point::new(100.0, 50.0), Point::new(120.0, 50.0));
        let second = engine.scene().shapes()[1].id();
        assert_eq!(engine.shape_at(Point::new(70.0, 50.0)), Some(second));
    }

    #[test]
    fn test_clear_all() {
        let (mut engine, _) = engine_with_rect();
        engine.clear_all();
        assert!(engine.scene().is_empty());
        assert_eq!(engine.selection(), None);
        assert_eq!(engine.shape_at(Point::new(30.0, 25.0)), None);
        assert_eq!(engine.surface_mut().take(), vec![Call::Clear]);
    }

    #[test]
    fn test_click_empty_space_clears_selection() {
        let (mut engine, _) = engine_with_rect();
        engine.handle_pointer(PointerEvent::Down { position: Point::new(300.0, 300.0) });
        engine.handle_pointer(PointerEvent::Up { position: Point::new(300.0, 300.0) });
        assert_eq!(engine.selection(), None);
        assert_eq!(
            engine.surface_mut().take(),
            vec![Call::Redraw { shapes: 1, handles: None }]
        );
    }

    #[test]
    fn test_pen_draws_incrementally() {
        let mut engine = engine();
        engine.handle_pointer(PointerEvent::Down { position: Point::new(0.0, 0.0) });
        engine.handle_pointer(PointerEvent::Move { position: Point::new(5.0, 5.0) });
        engine.handle_pointer(PointerEvent::Move { position: Point::new(10.0, 5.0) });
        engine.handle_pointer(PointerEvent::Up { position: Point::new(10.0, 5.0) });
        assert_eq!(engine.surface_mut().take(), vec![Call::Stroke, Call::Stroke]);
        assert_eq!(engine.scene().shapes()[0].kind(), ShapeKind::Path);
    }

    #[test]
    fn test_eraser_leaves_scene() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Rectangle);
        drag(&mut engine, Point::new(10.0, 10.0), Point::new(30.0, 20.0), Point::new(50.0, 40.0));
        engine.set_tool(ToolKind::Eraser);
        engine.set_stroke_width(4.0);
        engine.surface_mut().take();
        drag(&mut engine, Point::new(0.0, 0.0), Point::new(30.0, 30.0), Point::new(60.0, 60.0));
        assert_eq!(engine.scene().len(), 1);
        assert_eq!(engine.surface_mut().take(), vec![Call::Erase(12.0), Call::Erase(12.0)]);
    }

    #[test]
    fn test_pointer_leave_ends_gesture() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Line);
        engine.handle_pointer(PointerEvent::Down { position: Point::new(0.0, 0.0) });
        engine.handle_pointer(PointerEvent::Move { position: Point::new(40.0, 0.0) });
        engine.handle_pointer(PointerEvent::Leave);
        assert!(!engine.is_gesture_active());
        assert_eq!(engine.scene().shapes()[0].kind(), ShapeKind::Line);
    }

    #[test]
    fn test_cancel_restores_transform() {
        let (mut engine, id) = engine_with_rect();
        engine.handle_pointer(PointerEvent::Down { position: Point::new(30.0, -20.0) });
        engine.handle_pointer(PointerEvent::Move { position: Point::new(75.0, 25.0) });
        engine.handle_key(&KeyEvent::Pressed("Escape".to_string()));

        assert_eq!(engine.selection(), None);
        assert_eq!(engine.transform_mode(), TransformMode::Idle);
        let shape = engine.scene().get_shape(id).unwrap();
        assert_eq!(shape.kind(), ShapeKind::Rect);
        assert_eq!(
            engine.surface_mut().take().last(),
            Some(&Call::Redraw { shapes: 1, handles: None })
        );
    }

    #[test]
    fn test_cancel_drawing_discards_preview() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Arrow);
        engine.handle_pointer(PointerEvent::Down { position: Point::new(0.0, 0.0) });
        engine.handle_pointer(PointerEvent::Move { position: Point::new(40.0, 0.0) });
        engine.handle_key(&KeyEvent::Pressed("Escape".to_string()));
        engine.handle_pointer(PointerEvent::Up { position: Point::new(50.0, 0.0) });
        assert!(engine.scene().is_empty());
        assert_eq!(engine.surface_mut().take().last(), Some(&Call::Preview(None)));
    }

    #[test]
    fn test_move_override_key() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Star);
        engine.handle_key(&KeyEvent::Pressed("Space".to_string()));
        assert_eq!(engine.tool(), ToolKind::Move);
        engine.handle_key(&KeyEvent::Released("Space".to_string()));
        assert_eq!(engine.tool(), ToolKind::Star);
    }

    #[test]
    fn test_move_override_drags_shape() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Rectangle);
        drag(&mut engine, Point::new(10.0, 10.0), Point::new(30.0, 20.0), Point::new(50.0, 40.0));
        let id = engine.scene().shapes()[0].id();

        engine.handle_key(&KeyEvent::Pressed("Space".to_string()));
        drag(&mut engine, Point::new(30.0, 25.0), Point::new(31.0, 25.0), Point::new(40.0, 25.0));
        engine.handle_key(&KeyEvent::Released("Space".to_string()));

        assert_eq!(engine.tool(), ToolKind::Rectangle);
        assert_eq!(engine.scene().len(), 1);
        assert_eq!(engine.scene().get_shape(id).unwrap().bounds(&ApproximateTextMeasure).x0, 20.0);
    }

    #[test]
    fn test_text_request_and_commit() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Text);
        engine.set_stroke_width(4.0);
        let request = engine.handle_pointer(PointerEvent::Down { position: Point::new(5.0, 6.0) });
        assert_eq!(
            request,
            Some(EngineRequest::TextInput { position: Point::new(5.0, 6.0), font_size: 20.0 })
        );
        engine.handle_pointer(PointerEvent::Up { position: Point::new(5.0, 6.0) });
        assert!(engine.scene().is_empty());

        assert!(engine.commit_text(Point::new(5.0, 6.0), "   ").is_none());
        let id = engine.commit_text(Point::new(5.0, 6.0), "hello").unwrap();
        let Some(Shape::Text(text)) = engine.scene().get_shape(id) else {
            panic!("expected text");
        };
        assert!((text.font_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(engine.surface_mut().take(), vec![Call::Commit(ShapeKind::Text)]);
    }

    #[test]
    fn test_color_sample_picked() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Picker);
        let request = engine.handle_pointer(PointerEvent::Down { position: Point::new(1.0, 1.0) });
        assert_eq!(request, Some(EngineRequest::ColorSample));
        assert!(engine.is_color_sample_pending());
        assert_eq!(engine.cursor_hint(Point::new(1.0, 1.0)), CursorHint::Wait);

        let color = SerializableColor::new(10, 20, 30, 255);
        engine.resolve_color_sample(ColorSampleResult::Picked(color)).unwrap();
        assert_eq!(engine.style().stroke_color, color);
        assert_eq!(engine.tool(), ToolKind::Pen);
        assert!(!engine.is_color_sample_pending());
    }

    #[test]
    fn test_color_sample_abort_mutates_nothing() {
        let mut engine = engine();
        engine.set_tool(ToolKind::Picker);
        engine.handle_pointer(PointerEvent::Down { position: Point::new(1.0, 1.0) });
        // Drawing is suspended while the sample is outstanding.
        assert!(engine.handle_pointer(PointerEvent::Down { position: Point::new(2.0, 2.0) }).is_none());
        assert!(engine.request_color_sample().is_err());

        engine.resolve_color_sample(ColorSampleResult::Aborted).unwrap();
        assert_eq!(engine.style().stroke_color, SerializableColor::black());
        assert_eq!(engine.tool(), ToolKind::Picker);
        assert!(matches!(
            engine.resolve_color_sample(ColorSampleResult::Failed("gone".into())),
            Err(EngineError::NoColorSamplePending)
        ));
    }

    #[test]
    fn test_cursor_hints() {
        let (engine, _) = engine_with_rect();
        assert_eq!(engine.cursor_hint(Point::new(30.0, -20.0)), CursorHint::Rotate);
        assert_eq!(
            engine.cursor_hint(Point::new(10.0, 10.0)),
            CursorHint::Resize(HandleKind::Corner(Corner::TopLeft))
        );
        assert_eq!(engine.cursor_hint(Point::new(30.0, 25.0)), CursorHint::Move);
        assert_eq!(engine.cursor_hint(Point::new(200.0, 200.0)), CursorHint::Default);

        let mut engine = engine;
        engine.set_tool(ToolKind::Pen);
        assert_eq!(engine.cursor_hint(Point::new(30.0, 25.0)), CursorHint::Crosshair);
        assert_eq!(engine.selection(), None);
    }

    #[test]
    fn test_resize_surface_passes_through() {
        let mut engine = engine();
        engine.resize_surface(640, 480);
        assert_eq!(engine.surface_mut().take(), vec![Call::Resize(640, 480)]);
    }
}
