use std::fmt;
use std::str::FromStr;

use fractalgen_core::IterationResult;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An opaque 8-bit-per-channel color.
///
/// Serialized as a `#rrggbb` string so preference files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Accepts `#rrggbb`, `rrggbb`, `black` and `white`.
impl FromStr for Rgb {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            _ => {}
        }
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(RenderError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| RenderError::InvalidColor(s.to_string()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = RenderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

// ---------------------------------------------------------------------------
// Color mode
// ---------------------------------------------------------------------------

/// How escaped points (or geometric strokes) are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    #[default]
    Monochrome,
    Rainbow,
    Custom,
}

impl ColorMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Monochrome => "Monochrome",
            Self::Rainbow => "Rainbow",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monochrome" | "mono" => Ok(Self::Monochrome),
            "rainbow" => Ok(Self::Rainbow),
            "custom" => Ok(Self::Custom),
            _ => Err(RenderError::UnknownColorMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Escape-time coloring
// ---------------------------------------------------------------------------

/// Color for one escape-time result.
///
/// Interior points always take `inside`, whatever the mode.  Escaped
/// points are mapped by mode: Rainbow spreads the iteration range over a
/// full hue circle, Custom paints a flat `custom`, Monochrome paints white.
pub fn color_for(
    result: IterationResult,
    max_iterations: u32,
    mode: ColorMode,
    inside: Rgb,
    custom: Rgb,
) -> Rgb {
    let iterations = match result {
        IterationResult::Interior => return inside,
        IterationResult::Escaped { iterations } => iterations,
    };
    match mode {
        ColorMode::Rainbow => {
            // Escaped implies max_iterations > iterations >= 0.
            let hue = 360.0 * iterations as f64 / max_iterations as f64;
            hsv_to_rgb(hue, 1.0, 1.0)
        }
        ColorMode::Custom => custom,
        ColorMode::Monochrome => Rgb::WHITE,
    }
}

/// The single stroke/fill color of a geometric fractal.
///
/// Rainbow has no meaning for a flat outline and falls back to black.
pub fn geometric_color(mode: ColorMode, custom: Rgb) -> Rgb {
    match mode {
        ColorMode::Custom => custom,
        ColorMode::Monochrome | ColorMode::Rainbow => Rgb::BLACK,
    }
}

/// The color settings an escape-time render needs, bundled for the
/// per-pixel loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coloring {
    pub mode: ColorMode,
    pub inside: Rgb,
    pub custom: Rgb,
}

impl Coloring {
    #[inline]
    pub fn color(&self, result: IterationResult, max_iterations: u32) -> Rgb {
        color_for(result, max_iterations, self.mode, self.inside, self.custom)
    }
}

/// Convert HSV to RGB.  `hue` is in degrees and wraps at 360;
/// `saturation` and `value` are in `[0, 1]`.
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let h = hue.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_u8 = |c: f64| (c * 255.0).round() as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
