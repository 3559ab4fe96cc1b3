//! Error type for the renderer.
//!
//! Nothing in the transport core is retried. A failing sample aborts its
//! pixel; configuration and I/O errors abort the whole render.

use orb_math::MathError;
use thiserror::Error;

/// Errors that can occur while building a scene or rendering it.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    #[error("light sources do not scatter; the integrator must stop at emissive hits")]
    LightSourceScatter,

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown scene preset: {0}")]
    UnknownPreset(String),

    #[error("math error: {0}")]
    Math(#[from] MathError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
