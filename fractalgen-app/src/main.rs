mod app_dir;
mod cli;
mod preferences;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fractalgen_core::Viewport;
use fractalgen_render::{export_png, ExportMetadata, RenderSession};

use cli::Cli;
use preferences::AppPreferences;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting FractalGen");

    let mut prefs = AppPreferences::load();
    let width = cli.width.unwrap_or(prefs.canvas_width);
    let height = cli.height.unwrap_or(prefs.canvas_height);

    let start = prefs.initial_view().unwrap_or_default();
    let viewport = Viewport::new(
        cli.zoom.unwrap_or(start.zoom),
        cli.offset_x.unwrap_or(start.offset_x),
        cli.offset_y.unwrap_or(start.offset_y),
    );
    let mut session = RenderSession::new(width, height)
        .context("invalid canvas size")?
        .with_viewport(viewport);

    let mut fields = prefs.fields.clone();
    cli.apply_to(&mut fields);

    if cli.reset_view {
        session.reset_view();
    }
    let mut fresh = false;
    if cli.mandelbrot_preset {
        session.mandelbrot_preset(&fields).context("render failed")?;
        fresh = true;
    }
    if cli.julia_preset {
        session.julia_preset(&mut fields).context("render failed")?;
        fresh = true;
    }

    for scroll in &cli.scroll {
        session.scroll(scroll.at.x, scroll.at.y, scroll.direction);
    }
    for drag in &cli.drag {
        session.press(drag.from.x, drag.from.y);
        session.drag_to(drag.to.x, drag.to.y);
        session.release();
    }
    if let Some(at) = cli.status {
        println!("{}", session.status_text(at.x, at.y));
    }

    if !fresh || cli.replays_navigation() {
        session.redraw(&fields).context("render failed")?;
    }
    let pixels = session
        .current_frame()
        .context("no frame rendered")?
        .to_pixels()
        .context("failed to rasterise frame")?;
    let request = session
        .last_request()
        .context("no request recorded after a successful render")?;

    let path = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(request.kind.label()),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let meta = ExportMetadata::new(request, &session.viewport(), width, height);
    export_png(&pixels, &path, &meta)
        .with_context(|| format!("failed to export {}", path.display()))?;
    println!("{}", path.display());

    if cli.save_view {
        prefs.last_view = Some(session.viewport());
        prefs.save();
        info!(zoom = session.viewport().zoom, "Saved view");
    }

    Ok(())
}

/// `images/<kind>.png` next to the executable, e.g. `images/koch_snowflake.png`.
fn default_output_path(label: &str) -> PathBuf {
    let stem = label.to_ascii_lowercase().replace(' ', "_");
    app_dir::images_directory().join(format!("{stem}.png"))
}
