//! Drawing tools and their in-progress geometry.

use crate::shapes::{
    Arrow, Circle, Cross, Ellipse, Freehand, Highlight, Line, Polygon, Rectangle, SerializableColor,
    Shape, ShapeStyle,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Narrowest stroke width a host may set.
pub const MIN_STROKE_WIDTH: f64 = 1.0;
/// Widest stroke width a host may set.
pub const MAX_STROKE_WIDTH: f64 = 50.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pen,
    Rectangle,
    Circle,
    Ellipse,
    Line,
    Arrow,
    Triangle,
    Star,
    Cross,
    Highlight,
    Text,
    Move,
    Eraser,
    Picker,
}

impl ToolKind {
    /// Tools that create a shape from a drag through the preview layer.
    pub fn is_shape_tool(&self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle
                | ToolKind::Circle
                | ToolKind::Ellipse
                | ToolKind::Line
                | ToolKind::Arrow
                | ToolKind::Triangle
                | ToolKind::Star
                | ToolKind::Cross
                | ToolKind::Highlight
        )
    }
}

/// Active style applied to new shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub stroke_color: SerializableColor,
    stroke_width: f64,
    pub fill_color: Option<SerializableColor>,
    pub fill_enabled: bool,
}

impl Default for StyleSettings {
    fn default() -> Self {
        let style = ShapeStyle::default();
        Self {
            stroke_color: style.stroke_color,
            stroke_width: style.stroke_width,
            fill_color: style.fill_color,
            fill_enabled: style.fill_enabled,
        }
    }
}

impl StyleSettings {
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Set the stroke width, clamped to the supported range.
    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = if width.is_finite() {
            width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
        } else {
            ShapeStyle::default().stroke_width
        };
    }

    /// Snapshot for a new shape.
    pub fn shape_style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke_color: self.stroke_color,
            stroke_width: self.stroke_width,
            fill_color: self.fill_color,
            fill_enabled: self.fill_enabled,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// Tool is actively being used (e.g., drawing a shape).
    Active {
        /// Starting point of the interaction.
        start: Point,
        /// Current point of the interaction.
        current: Point,
        /// Whether the pointer has moved since the interaction began.
        moved: bool,
    },
}

/// Manages the current tool and its state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: ToolState,
    /// Accumulated points for pen drawing.
    freehand_points: Vec<Point>,
    /// Current style to apply to new shapes.
    pub style: StyleSettings,
    /// Fill opacity for new highlights.
    pub highlight_opacity: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            freehand_points: Vec::new(),
            style: StyleSettings::default(),
            highlight_opacity: 0.35,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, abandoning any interaction in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.cancel();
    }

    /// Begin a tool interaction.
    pub fn begin(&mut self, point: Point) {
        self.freehand_points.clear();
        if self.current_tool == ToolKind::Pen {
            self.freehand_points.push(point);
        }
        self.state = ToolState::Active {
            start: point,
            current: point,
            moved: false,
        };
    }

    /// Update the current interaction.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, moved, .. } = &mut self.state {
            *current = point;
            *moved = true;
            if self.current_tool == ToolKind::Pen {
                self.freehand_points.push(point);
            }
        }
    }

    /// End the current interaction and return the shape built from the
    /// final preview geometry. Nothing is created if the pointer never moved.
    pub fn end(&mut self) -> Option<Shape> {
        let shape = self.preview_shape();
        self.cancel();
        shape
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
        self.freehand_points.clear();
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolState::Active { .. })
    }

    /// Get the accumulated pen points.
    pub fn freehand_points(&self) -> &[Point] {
        &self.freehand_points
    }

    /// Get the preview shape for the current interaction.
    pub fn preview_shape(&self) -> Option<Shape> {
        let ToolState::Active { start, current, moved } = self.state else {
            return None;
        };
        if !moved {
            return None;
        }
        let mut shape = match self.current_tool {
            ToolKind::Pen => {
                if self.freehand_points.len() < 2 {
                    return None;
                }
                Shape::Path(Freehand::from_points(self.freehand_points.clone()))
            }
            ToolKind::Rectangle => Shape::Rect(Rectangle::from_corners(start, current)),
            ToolKind::Circle => Shape::Circle(Circle::new(start, start.distance(current))),
            ToolKind::Ellipse => Shape::Ellipse(Ellipse::from_corners(start, current)),
            ToolKind::Line => Shape::Line(Line::new(start, current)),
            ToolKind::Arrow => Shape::Arrow(Arrow::new(start, current)),
            ToolKind::Triangle => Shape::Polygon(Polygon::triangle(start, current)),
            ToolKind::Star => Shape::Polygon(Polygon::star(start, current)),
            ToolKind::Cross => Shape::Cross(Cross::from_corners(start, current)),
            ToolKind::Highlight => {
                Shape::Highlight(Highlight::from_corners(start, current, self.highlight_opacity))
            }
            ToolKind::Text | ToolKind::Move | ToolKind::Eraser | ToolKind::Picker => return None,
        };
        *shape.style_mut() = self.style.shape_style();
        Some(shape)
    }
}
