//! Host errors.

use overmark_core::EngineError;
use overmark_render::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Usage: {0}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Background image: {0}")]
    Image(#[from] image::ImageError),
}

pub type AppResult<T> = Result<T, AppError>;
