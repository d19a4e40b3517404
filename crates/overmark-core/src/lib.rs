//! Overmark Core Library
//!
//! Platform-agnostic annotation engine: shapes, hit-testing, transforms and
//! the gesture state machine that drives a [`Surface`].

pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod surface;
pub mod tools;
pub mod transform;

pub use config::EngineConfig;
pub use engine::{ColorSampleResult, CursorHint, Engine, EngineRequest};
pub use error::{EngineError, EngineResult};
pub use input::{KeyEvent, PointerEvent};
pub use scene::Scene;
pub use selection::{Corner, Edge, Handle, HandleKind};
pub use shapes::{SerializableColor, Shape, ShapeId, ShapeKind, ShapeStyle, ShapeTrait};
pub use surface::{ApproximateTextMeasure, Surface, TextMeasure};
pub use tools::{StyleSettings, ToolKind, ToolManager};
pub use transform::{TransformMode, TransformSession};
