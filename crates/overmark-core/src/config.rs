//! Engine configuration.

use crate::error::EngineResult;
use crate::shapes::{FontFamily, FontWeight};
use serde::{Deserialize, Serialize};

/// Host-tunable engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Key name that cancels the current gesture and clears the selection.
    pub cancel_key: String,
    /// Key name that temporarily switches to the move tool while held.
    pub move_override_key: String,
    /// Eraser width as a multiple of the stroke width.
    pub eraser_width_multiplier: f64,
    /// Font size of new text as a multiple of the stroke width.
    pub text_size_multiplier: f64,
    /// Font family for new text.
    pub font_family: FontFamily,
    /// Font weight for new text.
    pub font_weight: FontWeight,
    /// Fill opacity of highlights.
    pub highlight_opacity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cancel_key: "Escape".to_string(),
            move_override_key: "Space".to_string(),
            eraser_width_multiplier: 3.0,
            text_size_multiplier: 5.0,
            font_family: FontFamily::default(),
            font_weight: FontWeight::default(),
            highlight_opacity: 0.35,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
