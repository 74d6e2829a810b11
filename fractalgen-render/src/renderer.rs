use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use fractalgen_core::geometry::{koch_snowflake, sierpinski};
use fractalgen_core::{CoreError, DrawCommand, EscapeTime, Julia, Mandelbrot, Viewport};

use crate::buffer::PixelBuffer;
use crate::error::RenderError;
use crate::palette::{geometric_color, Coloring, Rgb};
use crate::raster::Rasterizer;
use crate::request::{FractalKind, RenderRequest};

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One geometric render: a background plus primitives in a single color.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorFrame {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    pub color: Rgb,
    pub commands: Vec<DrawCommand>,
}

impl VectorFrame {
    /// Paint the frame onto a fresh pixel buffer.
    pub fn rasterize(&self) -> crate::Result<PixelBuffer> {
        let mut buffer = PixelBuffer::filled(self.width, self.height, self.background)?;
        Rasterizer::new(&mut buffer, self.color).draw_all(&self.commands);
        Ok(buffer)
    }
}

/// The finished product of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    /// Escape-time fractals: a fully written pixel grid.
    Raster(PixelBuffer),
    /// Geometric fractals: a draw list for the surface to apply.
    Vector(VectorFrame),
}

impl RenderOutput {
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Raster(buf) => (buf.width, buf.height),
            Self::Vector(frame) => (frame.width, frame.height),
        }
    }

    /// Pixels for display or export, rasterising vector frames on demand.
    pub fn to_pixels(&self) -> crate::Result<PixelBuffer> {
        match self {
            Self::Raster(buf) => Ok(buf.clone()),
            Self::Vector(frame) => frame.rasterize(),
        }
    }
}

// ---------------------------------------------------------------------------
// Escape-time rendering
// ---------------------------------------------------------------------------

/// Evaluate and color every pixel of a `width × height` canvas.
///
/// Rows are processed in parallel via Rayon.  Each pixel depends only on
/// its own coordinate and the immutable inputs, so the result is identical
/// to a sequential pass.
pub fn render_escape_time<F: EscapeTime + Sync>(
    fractal: &F,
    viewport: &Viewport,
    width: u32,
    height: u32,
    coloring: &Coloring,
) -> crate::Result<PixelBuffer> {
    let mut buffer = PixelBuffer::filled(width, height, coloring.inside)?;
    let max_iterations = fractal.max_iterations();
    let stride = buffer.stride();

    buffer
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, pixel) in row
                .chunks_exact_mut(PixelBuffer::BYTES_PER_PIXEL)
                .enumerate()
            {
                let point = viewport.pixel_to_complex(px as u32, py as u32, width, height);
                let color = coloring.color(fractal.evaluate(point), max_iterations);
                pixel.copy_from_slice(&color.to_bytes());
            }
        });

    Ok(buffer)
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Render one frame for `request` on a `width × height` canvas.
///
/// Mandelbrot and Julia produce a [`RenderOutput::Raster`]; Sierpinski and
/// Koch produce a [`RenderOutput::Vector`].  Geometric fractals are laid out
/// in canvas space and ignore the viewport.
pub fn render(
    request: &RenderRequest,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> crate::Result<RenderOutput> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height }.into());
    }
    request.validate()?;
    let start = Instant::now();
    debug!(
        kind = %request.kind,
        depth_or_iterations = request.depth_or_iterations,
        zoom = viewport.zoom,
        offset_x = viewport.offset_x,
        offset_y = viewport.offset_y,
        width,
        height,
        "Starting render"
    );

    let output = match request.kind {
        FractalKind::Mandelbrot => {
            let fractal = Mandelbrot::new(request.depth_or_iterations);
            RenderOutput::Raster(render_escape_time(
                &fractal,
                viewport,
                width,
                height,
                &request.coloring(),
            )?)
        }
        FractalKind::Julia => {
            let c = request
                .julia_constant
                .ok_or(RenderError::JuliaConstantMismatch { kind: request.kind })?;
            let fractal = Julia::new(c, request.depth_or_iterations);
            RenderOutput::Raster(render_escape_time(
                &fractal,
                viewport,
                width,
                height,
                &request.coloring(),
            )?)
        }
        FractalKind::Sierpinski | FractalKind::Koch => {
            let mut commands = Vec::new();
            if request.kind == FractalKind::Sierpinski {
                sierpinski(width, height, request.depth_or_iterations, &mut commands)?;
            } else {
                koch_snowflake(width, height, request.depth_or_iterations, &mut commands)?;
            }
            RenderOutput::Vector(VectorFrame {
                width,
                height,
                background: request.background_color,
                color: geometric_color(request.color_mode, request.custom_color),
                commands,
            })
        }
    };

    info!(
        kind = %request.kind,
        elapsed_ms = start.elapsed().as_millis(),
        "Render complete"
    );
    Ok(output)
}
