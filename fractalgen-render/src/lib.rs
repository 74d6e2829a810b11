pub mod buffer;
pub mod error;
pub mod export;
pub mod palette;
pub mod raster;
pub mod renderer;
pub mod request;
pub mod session;

pub use buffer::PixelBuffer;
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use palette::{color_for, geometric_color, hsv_to_rgb, ColorMode, Coloring, Rgb};
pub use raster::Rasterizer;
pub use renderer::{render, render_escape_time, RenderOutput, VectorFrame};
pub use request::{FractalKind, RenderRequest, RequestFields};
pub use session::RenderSession;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
