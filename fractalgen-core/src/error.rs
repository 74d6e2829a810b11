use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid depth/iteration count: {0:?} (must be a whole number >= 0)")]
    InvalidIterationCount(String),

    #[error("invalid Julia constant {field}: {text:?} (must be a finite number)")]
    InvalidJuliaConstant { field: &'static str, text: String },

    #[error("recursion depth {depth} exceeds the maximum of {max}")]
    RecursionDepthExceeded { depth: u32, max: u32 },

    #[error("invalid canvas dimensions: {width}×{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
