use std::fmt;
use std::str::FromStr;

use fractalgen_core::geometry::check_depth;
use fractalgen_core::{Complex, CoreError, MAX_KOCH_DEPTH, MAX_SIERPINSKI_DEPTH};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::palette::{ColorMode, Coloring, Rgb};

// ---------------------------------------------------------------------------
// Fractal kind
// ---------------------------------------------------------------------------

/// The four supported fractal families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalKind {
    #[default]
    Sierpinski,
    Mandelbrot,
    Julia,
    Koch,
}

impl FractalKind {
    pub const ALL: [FractalKind; 4] = [Self::Sierpinski, Self::Mandelbrot, Self::Julia, Self::Koch];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sierpinski => "Sierpinski Triangle",
            Self::Mandelbrot => "Mandelbrot Set",
            Self::Julia => "Julia Set",
            Self::Koch => "Koch Snowflake",
        }
    }

    /// Recursion limit for the geometric families; `None` for escape-time.
    pub fn max_depth(self) -> Option<u32> {
        match self {
            Self::Sierpinski => Some(MAX_SIERPINSKI_DEPTH),
            Self::Koch => Some(MAX_KOCH_DEPTH),
            Self::Mandelbrot | Self::Julia => None,
        }
    }
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts the short names (`koch`) and the display labels (`Koch Snowflake`).
impl FromStr for FractalKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "sierpinski" => return Ok(Self::Sierpinski),
            "mandelbrot" => return Ok(Self::Mandelbrot),
            "julia" => return Ok(Self::Julia),
            "koch" => return Ok(Self::Koch),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| RenderError::UnknownFractalKind(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Render request
// ---------------------------------------------------------------------------

/// Everything one render pass needs besides the viewport and canvas size.
///
/// Built fresh for every redraw and never mutated during a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub kind: FractalKind,
    /// Iteration cap for Mandelbrot/Julia, recursion depth for Sierpinski/Koch.
    pub depth_or_iterations: u32,
    pub color_mode: ColorMode,
    pub custom_color: Rgb,
    pub background_color: Rgb,
    pub inside_color: Rgb,
    /// Present iff `kind` is [`FractalKind::Julia`].
    pub julia_constant: Option<Complex>,
}

impl RenderRequest {
    pub fn coloring(&self) -> Coloring {
        Coloring {
            mode: self.color_mode,
            inside: self.inside_color,
            custom: self.custom_color,
        }
    }

    /// Check the invariants [`RequestFields::parse`] establishes, for
    /// requests built by hand: a Julia constant exactly when `kind` is Julia,
    /// and a geometric depth within its limit.
    pub fn validate(&self) -> crate::Result<()> {
        let wants_constant = self.kind == FractalKind::Julia;
        if wants_constant != self.julia_constant.is_some() {
            return Err(RenderError::JuliaConstantMismatch { kind: self.kind });
        }
        if let Some(max) = self.kind.max_depth() {
            check_depth(self.depth_or_iterations, max)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Raw UI fields
// ---------------------------------------------------------------------------

/// The user's inputs as entered: pickers already hold typed values, text
/// boxes hold raw strings that are only validated at redraw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestFields {
    pub kind: FractalKind,
    pub depth: String,
    pub color_mode: ColorMode,
    pub custom_color: Rgb,
    pub background_color: Rgb,
    pub inside_color: Rgb,
    pub julia_cx: String,
    pub julia_cy: String,
}

/// Text shown in the Julia constant boxes by default and after a preset.
pub const DEFAULT_JULIA_CX: &str = "-0.7";
pub const DEFAULT_JULIA_CY: &str = "0.27015";

impl Default for RequestFields {
    fn default() -> Self {
        Self {
            kind: FractalKind::default(),
            depth: "6".to_string(),
            color_mode: ColorMode::default(),
            custom_color: Rgb::BLACK,
            background_color: Rgb::WHITE,
            inside_color: Rgb::BLACK,
            julia_cx: DEFAULT_JULIA_CX.to_string(),
            julia_cy: DEFAULT_JULIA_CY.to_string(),
        }
    }
}

fn parse_julia_part(field: &'static str, text: &str) -> fractalgen_core::Result<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoreError::InvalidJuliaConstant {
            field,
            text: text.to_string(),
        })
}

impl RequestFields {
    /// Validate the text fields and build an immutable request.
    ///
    /// The Julia constant is only parsed for Julia renders, and geometric
    /// depths are checked against the recursion guard here so a bad value
    /// is reported before anything is drawn.
    pub fn parse(&self) -> fractalgen_core::Result<RenderRequest> {
        let depth_or_iterations = self
            .depth
            .trim()
            .parse::<u32>()
            .map_err(|_| CoreError::InvalidIterationCount(self.depth.clone()))?;

        let julia_constant = match self.kind {
            FractalKind::Julia => Some(Complex::new(
                parse_julia_part("real part", &self.julia_cx)?,
                parse_julia_part("imaginary part", &self.julia_cy)?,
            )),
            _ => None,
        };

        if let Some(max) = self.kind.max_depth() {
            check_depth(depth_or_iterations, max)?;
        }

        Ok(RenderRequest {
            kind: self.kind,
            depth_or_iterations,
            color_mode: self.color_mode,
            custom_color: self.custom_color,
            background_color: self.background_color,
            inside_color: self.inside_color,
            julia_constant,
        })
    }

    /// Restore the Julia constant boxes to the preset values.
    pub fn apply_julia_preset(&mut self) {
        self.julia_cx = DEFAULT_JULIA_CX.to_string();
        self.julia_cy = DEFAULT_JULIA_CY.to_string();
    }
}
