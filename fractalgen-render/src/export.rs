//! PNG export with embedded render parameters (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use tracing::{debug, info};

use fractalgen_core::Viewport;

use crate::buffer::PixelBuffer;
use crate::request::RenderRequest;

/// Metadata to embed in an exported PNG as tEXt chunks.
pub struct ExportMetadata {
    pub fractal_type: String,
    pub depth_or_iterations: u32,
    pub color_mode: String,
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub julia_c: Option<(f64, f64)>,
    pub width: u32,
    pub height: u32,
}

impl ExportMetadata {
    pub fn new(request: &RenderRequest, viewport: &Viewport, width: u32, height: u32) -> Self {
        Self {
            fractal_type: request.kind.label().to_string(),
            depth_or_iterations: request.depth_or_iterations,
            color_mode: request.color_mode.label().to_string(),
            zoom: viewport.zoom,
            offset_x: viewport.offset_x,
            offset_y: viewport.offset_y,
            julia_c: request.julia_constant.map(|c| (c.re, c.im)),
            width,
            height,
        }
    }
}

/// Write an RGB pixel buffer as a PNG file with embedded fractal metadata.
///
/// Uses the `png` crate directly to inject custom tEXt chunks readable by
/// exiftool and most image viewers.
pub fn export_png(buffer: &PixelBuffer, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), "FractalGen".to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.pixels)?;
    png_writer.finish()?;

    debug!(
        width = buffer.width,
        height = buffer.height,
        kind = %metadata.fractal_type,
        "Encoded PNG"
    );
    info!("Exported image to {}", path.display());
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "{} - Depth/Iterations: {}, Zoom: {}, Offset: ({}, {})",
        meta.fractal_type, meta.depth_or_iterations, meta.zoom, meta.offset_x, meta.offset_y,
    );
    if let Some((re, im)) = meta.julia_c {
        desc.push_str(&format!(", Julia C: {re} {im}i"));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("FractalGen.FractalType".into(), meta.fractal_type.clone()),
        (
            "FractalGen.DepthOrIterations".into(),
            meta.depth_or_iterations.to_string(),
        ),
        ("FractalGen.ColorMode".into(), meta.color_mode.clone()),
        ("FractalGen.Zoom".into(), meta.zoom.to_string()),
        ("FractalGen.OffsetX".into(), meta.offset_x.to_string()),
        ("FractalGen.OffsetY".into(), meta.offset_y.to_string()),
        (
            "FractalGen.Resolution".into(),
            format!("{}x{}", meta.width, meta.height),
        ),
    ];
    if let Some((re, im)) = meta.julia_c {
        pairs.push(("FractalGen.JuliaC_Re".into(), re.to_string()));
        pairs.push(("FractalGen.JuliaC_Im".into(), im.to_string()));
    }
    pairs
}
