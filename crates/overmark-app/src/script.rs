//! JSON input scripts replayed through the engine.
//!
//! A script stands in for the toolbar and the platform event loop: each step
//! is either a host setting or one input event.

use crate::error::AppResult;
use kurbo::Point;
use log::{debug, info, warn};
use overmark_core::{
    ColorSampleResult, Engine, EngineConfig, EngineRequest, KeyEvent, PointerEvent, SerializableColor,
    Surface, ToolKind,
};
use serde::Deserialize;

/// A recorded session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub config: EngineConfig,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: ToolKind },
    /// Stroke color as `#rrggbb` or `#rrggbbaa`.
    Color { color: String },
    Width { width: f64 },
    Fill {
        #[serde(default)]
        color: Option<String>,
        enabled: bool,
    },
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave,
    KeyDown { key: String },
    KeyUp { key: String },
    /// Content typed into the pending text input.
    Text { content: String },
    /// Answer to the pending color sample; no color means the user aborted.
    Sample {
        #[serde(default)]
        color: Option<String>,
    },
    Clear,
    Resize { width: u32, height: u32 },
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Feeds script steps into an engine, answering its requests.
pub struct Player<S: Surface> {
    engine: Engine<S>,
    pending_text: Option<Point>,
}

impl<S: Surface> Player<S> {
    pub fn new(engine: Engine<S>) -> Self {
        Self {
            engine,
            pending_text: None,
        }
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn into_engine(self) -> Engine<S> {
        self.engine
    }

    /// Play every step in order.
    pub fn play(&mut self, steps: &[Step]) -> AppResult<()> {
        for step in steps {
            self.step(step)?;
        }
        info!("Played {} steps, {} shapes in scene", steps.len(), self.engine.scene().len());
        Ok(())
    }

    pub fn step(&mut self, step: &Step) -> AppResult<()> {
        debug!("Step {:?}", step);
        match step {
            Step::Tool { tool } => self.engine.set_tool(*tool),
            Step::Color { color } => self.engine.set_stroke_color(color.parse::<SerializableColor>()?),
            Step::Width { width } => self.engine.set_stroke_width(*width),
            Step::Fill { color, enabled } => {
                let color = color.as_deref().map(str::parse::<SerializableColor>).transpose()?;
                self.engine.set_fill_color(color);
                self.engine.set_fill_enabled(*enabled);
            }
            Step::Down { x, y } => self.pointer(PointerEvent::Down { position: Point::new(*x, *y) }),
            Step::Move { x, y } => self.pointer(PointerEvent::Move { position: Point::new(*x, *y) }),
            Step::Up { x, y } => self.pointer(PointerEvent::Up { position: Point::new(*x, *y) }),
            Step::Leave => self.pointer(PointerEvent::Leave),
            Step::KeyDown { key } => self.engine.handle_key(&KeyEvent::Pressed(key.clone())),
            Step::KeyUp { key } => self.engine.handle_key(&KeyEvent::Released(key.clone())),
            Step::Text { content } => match self.pending_text.take() {
                Some(position) => {
                    self.engine.commit_text(position, content);
                }
                None => warn!("Text step with no text input open, skipped"),
            },
            Step::Sample { color } => {
                let result = match color {
                    Some(hex) => ColorSampleResult::Picked(hex.parse()?),
                    None => ColorSampleResult::Aborted,
                };
                self.engine.resolve_color_sample(result)?;
            }
            Step::Clear => self.engine.clear_all(),
            Step::Resize { width, height } => self.engine.resize_surface(*width, *height),
        }
        Ok(())
    }

    fn pointer(&mut self, event: PointerEvent) {
        match self.engine.handle_pointer(event) {
            Some(EngineRequest::TextInput { position, font_size }) => {
                debug!("Text input requested at ({}, {}), size {}", position.x, position.y, font_size);
                self.pending_text = Some(position);
            }
            Some(EngineRequest::ColorSample) => debug!("Color sample requested"),
            None => {}
        }
    }
}
