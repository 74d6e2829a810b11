pub mod complex;
pub mod error;
pub mod fractal;
pub mod geometry;
pub mod julia;
pub mod mandelbrot;
pub mod viewport;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{escape_time, EscapeTime, IterationResult, ESCAPE_NORM_SQ};
pub use geometry::{DrawCommand, DrawSink, Point, MAX_KOCH_DEPTH, MAX_SIERPINSKI_DEPTH};
pub use julia::Julia;
pub use mandelbrot::Mandelbrot;
pub use viewport::{DragAnchor, ScrollDirection, Viewport, MAX_ZOOM, MIN_ZOOM};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
