//! Command-line surface: every control of the interactive window as a flag.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use fractalgen_core::ScrollDirection;
use fractalgen_render::{ColorMode, FractalKind, RequestFields, Rgb};

#[derive(Parser, Debug)]
#[command(
    name = "fractalgen",
    version,
    about = "Render Sierpinski, Mandelbrot, Julia and Koch fractals to PNG"
)]
pub struct Cli {
    /// Fractal to draw: sierpinski, mandelbrot, julia or koch.
    #[arg(long)]
    pub kind: Option<FractalKind>,

    /// Recursion depth (Sierpinski, Koch) or iteration cap (Mandelbrot, Julia).
    ///
    /// Kept as text and validated at render time.
    #[arg(long, allow_hyphen_values = true)]
    pub depth: Option<String>,

    /// monochrome, rainbow or custom.
    #[arg(long)]
    pub color_mode: Option<ColorMode>,

    /// Drawing color for custom mode, `#rrggbb`.
    #[arg(long)]
    pub custom_color: Option<Rgb>,

    /// Canvas background behind geometric fractals.
    #[arg(long)]
    pub background: Option<Rgb>,

    /// Color of points that never escape.
    #[arg(long)]
    pub inside: Option<Rgb>,

    /// Real part of the Julia constant.
    #[arg(long, allow_hyphen_values = true)]
    pub julia_cx: Option<String>,

    /// Imaginary part of the Julia constant.
    #[arg(long, allow_hyphen_values = true)]
    pub julia_cy: Option<String>,

    /// Return to zoom 1 with no offset before replaying navigation.
    #[arg(long)]
    pub reset_view: bool,

    /// Recentre the view and render, before replaying navigation.
    #[arg(long)]
    pub mandelbrot_preset: bool,

    /// Restore the default Julia constant and render, before replaying navigation.
    #[arg(long)]
    pub julia_preset: bool,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub zoom: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub offset_x: Option<f64>,

    #[arg(long, allow_negative_numbers = true)]
    pub offset_y: Option<f64>,

    /// Scroll one notch at a pixel: `X,Y,up` or `X,Y,down`. Repeatable.
    #[arg(long, allow_hyphen_values = true)]
    pub scroll: Vec<ScrollArg>,

    /// Drag from one pixel to another: `X0,Y0,X1,Y1`. Repeatable; applied after scrolls.
    #[arg(long, allow_hyphen_values = true)]
    pub drag: Vec<DragArg>,

    /// Print the status line for the pointer at `X,Y`.
    #[arg(long, allow_hyphen_values = true)]
    pub status: Option<PixelArg>,

    /// PNG destination. Defaults to the `images/` folder next to the executable.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Store the final viewport in the preferences file.
    #[arg(long)]
    pub save_view: bool,
}

impl Cli {
    /// `true` if any `--scroll` or `--drag` step was given.
    pub fn replays_navigation(&self) -> bool {
        !self.scroll.is_empty() || !self.drag.is_empty()
    }

    /// Overlay the flags that were given onto the stored control values.
    pub fn apply_to(&self, fields: &mut RequestFields) {
        if let Some(kind) = self.kind {
            fields.kind = kind;
        }
        if let Some(depth) = &self.depth {
            fields.depth = depth.clone();
        }
        if let Some(mode) = self.color_mode {
            fields.color_mode = mode;
        }
        if let Some(color) = self.custom_color {
            fields.custom_color = color;
        }
        if let Some(color) = self.background {
            fields.background_color = color;
        }
        if let Some(color) = self.inside {
            fields.inside_color = color;
        }
        if let Some(cx) = &self.julia_cx {
            fields.julia_cx = cx.clone();
        }
        if let Some(cy) = &self.julia_cy {
            fields.julia_cy = cy.clone();
        }
    }
}

fn parse_coords<const N: usize>(s: &str, what: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {what}"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| format!("{part:?} is not a number (expected {what})"))?;
    }
    Ok(out)
}

/// A pixel position given as `X,Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelArg {
    pub x: f64,
    pub y: f64,
}

impl FromStr for PixelArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x, y] = parse_coords(s, "X,Y")?;
        Ok(Self { x, y })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollArg {
    pub at: PixelArg,
    pub direction: ScrollDirection,
}

impl FromStr for ScrollArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (coords, dir) = s
            .rsplit_once(',')
            .ok_or_else(|| "expected X,Y,up|down".to_string())?;
        let direction = match dir.trim().to_ascii_lowercase().as_str() {
            "up" => ScrollDirection::Up,
            "down" => ScrollDirection::Down,
            other => return Err(format!("{other:?} is not a scroll direction (up or down)")),
        };
        let [x, y] = parse_coords(coords, "X,Y,up|down")?;
        Ok(Self {
            at: PixelArg { x, y },
            direction,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragArg {
    pub from: PixelArg,
    pub to: PixelArg,
}

impl FromStr for DragArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x0, y0, x1, y1] = parse_coords(s, "X0,Y0,X1,Y1")?;
        Ok(Self {
            from: PixelArg { x: x0, y: y0 },
            to: PixelArg { x: x1, y: y1 },
        })
    }
}
