use thiserror::Error;

use crate::request::FractalKind;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown fractal type: {0:?}")]
    UnknownFractalKind(String),

    #[error("unknown color mode: {0:?}")]
    UnknownColorMode(String),

    #[error("invalid color: {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("{kind} request must carry a Julia constant exactly when it is a Julia set")]
    JuliaConstantMismatch { kind: FractalKind },

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode PNG: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error(transparent)]
    Core(#[from] fractalgen_core::CoreError),
}
