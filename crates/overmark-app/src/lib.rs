//! Overmark host
//!
//! Replays recorded input scripts through the annotation engine and exports
//! the result as PNG.

mod error;
pub mod export;
pub mod script;

pub use error::{AppError, AppResult};
pub use script::{Player, Script, Step};

use overmark_core::Engine;
use overmark_render::{RenderPipeline, ResvgRasterizer, VectorRasterizer};
use std::path::Path;

/// Play `script` on a fresh pipeline using `rasterizer`.
pub fn run_script<R: VectorRasterizer>(script: &Script, rasterizer: R) -> AppResult<Engine<RenderPipeline<R>>> {
    let pipeline = RenderPipeline::with_rasterizer(script.width, script.height, rasterizer)?;
    let mut player = Player::new(Engine::with_config(pipeline, script.config.clone()));
    player.play(&script.steps)?;
    Ok(player.into_engine())
}

/// Read a script, play it with system fonts and write the flattened PNG.
pub fn render_file(script_path: &Path, output: &Path, background: Option<&Path>) -> AppResult<()> {
    let script = Script::from_json(&std::fs::read_to_string(script_path)?)?;
    let background = background.map(export::load_background).transpose()?;
    let engine = run_script(&script, ResvgRasterizer::new())?;
    export::write_png(output, engine.surface().committed(), background.as_ref())
}
