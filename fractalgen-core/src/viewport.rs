use crate::complex::Complex;

/// Smallest zoom factor a viewport may hold.
pub const MIN_ZOOM: f64 = 1e-3;
/// Largest zoom factor a viewport may hold.
pub const MAX_ZOOM: f64 = 1e3;

/// Zoom multiplier applied per scroll notch.
const SCROLL_ZOOM_IN: f64 = 1.1;
const SCROLL_ZOOM_OUT: f64 = 0.9;

/// Widens the real axis relative to the imaginary one so the Mandelbrot
/// set's cardioid and bulb fit a landscape canvas.
const HORIZONTAL_STRETCH: f64 = 1.5;

/// The zoom + pan transform from canvas pixels to the fractal plane.
///
/// The canvas size is *not* part of the viewport: the same viewport is
/// applied to whatever surface the caller renders into.  The zoom factor is
/// always kept inside `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Viewport {
    pub zoom: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Deserialising clamps the zoom the same way [`Viewport::new`] does.
impl<'de> serde::Deserialize<'de> for Viewport {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            zoom: f64,
            #[serde(default)]
            offset_x: f64,
            #[serde(default)]
            offset_y: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.zoom, raw.offset_x, raw.offset_y))
    }
}

/// Direction of a single scroll-wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Positive wheel delta: zoom in.
    Up,
    /// Negative wheel delta: zoom out.
    Down,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Integer half of a canvas dimension.
///
/// Canvas centres are taken on whole pixels, so odd sizes round down.
#[inline]
fn half(extent: u32) -> f64 {
    (extent / 2) as f64
}

#[inline]
fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

impl Viewport {
    /// Create a viewport, clamping `zoom` into `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn new(zoom: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            offset_x,
            offset_y,
        }
    }

    /// Map a pixel coordinate to the fractal plane.
    ///
    /// `(0, 0)` is the top-left pixel and the y-axis is *not* flipped:
    /// increasing pixel-y increases the imaginary part.
    #[inline]
    pub fn to_fractal_space(&self, px: f64, py: f64, width: u32, height: u32) -> (f64, f64) {
        let fx = HORIZONTAL_STRETCH * (px - half(width)) / (0.5 * self.zoom * width as f64)
            - self.offset_x;
        let fy = (py - half(height)) / (0.5 * self.zoom * height as f64) - self.offset_y;
        (fx, fy)
    }

    /// Same as [`to_fractal_space`](Self::to_fractal_space), packed as a [`Complex`].
    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32, width: u32, height: u32) -> Complex {
        Complex::from(self.to_fractal_space(px as f64, py as f64, width, height))
    }

    /// Zoom to `new_zoom` while keeping the fractal point under `(px, py)`
    /// pinned to that pixel.
    ///
    /// `new_zoom` is clamped first; the current zoom is the "old" zoom.
    pub fn zoom_at(&self, px: f64, py: f64, new_zoom: f64, width: u32, height: u32) -> Self {
        let new_zoom = clamp_zoom(new_zoom);
        if new_zoom == self.zoom {
            return *self;
        }
        let (fx, fy) = self.to_fractal_space(px, py, width, height);
        Self {
            zoom: new_zoom,
            offset_x: HORIZONTAL_STRETCH * (px - half(width)) / (0.5 * new_zoom * width as f64)
                - fx,
            offset_y: (py - half(height)) / (0.5 * new_zoom * height as f64) - fy,
        }
    }

    /// Apply one scroll notch around the cursor.
    pub fn scroll(&self, px: f64, py: f64, direction: ScrollDirection, width: u32, height: u32) -> Self {
        let factor = match direction {
            ScrollDirection::Up => SCROLL_ZOOM_IN,
            ScrollDirection::Down => SCROLL_ZOOM_OUT,
        };
        self.zoom_at(px, py, self.zoom * factor, width, height)
    }

    /// Start a drag-pan at the given press position.
    pub fn begin_drag(&self, press_x: f64, press_y: f64) -> DragAnchor {
        DragAnchor {
            press_x,
            press_y,
            offset_x: self.offset_x,
            offset_y: self.offset_y,
        }
    }
}

/// The press point and offsets captured when a drag starts.
///
/// Every drag update is computed from this anchor, never accumulated
/// frame by frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    pub press_x: f64,
    pub press_y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl DragAnchor {
    /// Offsets for the pointer now at `(x, y)`, using the zoom of `current`.
    pub fn apply(&self, current: &Viewport, x: f64, y: f64, width: u32, height: u32) -> Viewport {
        let dx = x - self.press_x;
        let dy = y - self.press_y;
        Viewport {
            zoom: current.zoom,
            offset_x: self.offset_x - (dx * 3.0) / (current.zoom * width as f64),
            offset_y: self.offset_y - (dy * 2.0) / (current.zoom * height as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;
    const W: u32 = 1200;
    const H: u32 = 800;

    #[test]
    fn centre_maps_to_origin() {
        let vp = Viewport::default();
        let (fx, fy) = vp.to_fractal_space(600.0, 400.0, W, H);
        assert!(fx.abs() < EPSILON);
        assert!(fy.abs() < EPSILON);
    }

    #[test]
    fn corners_span_three_by_two() {
        let vp = Viewport::default();
        let (l, t) = vp.to_fractal_space(0.0, 0.0, W, H);
        let (r, b) = vp.to_fractal_space(W as f64, H as f64, W, H);
        assert!((l - (-1.5)).abs() < EPSILON);
        assert!((r - 1.5).abs() < EPSILON);
        assert!((t - (-1.0)).abs() < EPSILON);
        assert!((b - 1.0).abs() < EPSILON);
    }

    #[test]
    fn offsets_shift_the_plane() {
        let vp = Viewport::new(1.0, 0.5, -0.25);
        let (fx, fy) = vp.to_fractal_space(600.0, 400.0, W, H);
        assert!((fx - (-0.5)).abs() < EPSILON);
        assert!((fy - 0.25).abs() < EPSILON);
    }

    #[test]
    fn new_clamps_zoom() {
        assert_eq!(Viewport::new(1e9, 0.0, 0.0).zoom, MAX_ZOOM);
        assert_eq!(Viewport::new(0.0, 0.0, 0.0).zoom, MIN_ZOOM);
        assert_eq!(Viewport::new(f64::NAN, 0.0, 0.0).zoom, 1.0);
    }

    #[test]
    fn zoom_at_same_zoom_is_identity() {
        let vp = Viewport::new(2.5, 0.3, -0.7);
        assert_eq!(vp.zoom_at(123.0, 456.0, 2.5, W, H), vp);
    }

    #[test]
    fn zoom_at_keeps_point_under_cursor() {
        let vp = Viewport::new(1.3, 0.2, 0.1);
        let (px, py) = (900.0, 150.0);
        let before = vp.to_fractal_space(px, py, W, H);
        let zoomed = vp.zoom_at(px, py, 7.0, W, H);
        let after = zoomed.to_fractal_space(px, py, W, H);
        assert_eq!(zoomed.zoom, 7.0);
        assert!((before.0 - after.0).abs() < EPSILON);
        assert!((before.1 - after.1).abs() < EPSILON);
    }

    #[test]
    fn zoom_at_clamps_before_solving() {
        let vp = Viewport::default();
        let (px, py) = (100.0, 700.0);
        let before = vp.to_fractal_space(px, py, W, H);
        let zoomed = vp.zoom_at(px, py, 5e4, W, H);
        assert_eq!(zoomed.zoom, MAX_ZOOM);
        let after = zoomed.to_fractal_space(px, py, W, H);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn scroll_steps_zoom() {
        let vp = Viewport::default();
        let up = vp.scroll(600.0, 400.0, ScrollDirection::Up, W, H);
        assert!((up.zoom - 1.1).abs() < EPSILON);
        let down = vp.scroll(600.0, 400.0, ScrollDirection::Down, W, H);
        assert!((down.zoom - 0.9).abs() < EPSILON);
        // Zooming around the centre leaves the offsets alone.
        assert!(up.offset_x.abs() < EPSILON && up.offset_y.abs() < EPSILON);
    }

    #[test]
    fn drag_is_computed_from_press_point() {
        let vp = Viewport::new(2.0, 0.1, 0.2);
        let anchor = vp.begin_drag(100.0, 100.0);

        let mid = anchor.apply(&vp, 150.0, 80.0, W, H);
        let end = anchor.apply(&mid, 220.0, 60.0, W, H);

        // The final position depends only on the total displacement.
        let direct = anchor.apply(&vp, 220.0, 60.0, W, H);
        assert_eq!(end, direct);
        assert!((end.offset_x - (0.1 - (120.0 * 3.0) / (2.0 * W as f64))).abs() < EPSILON);
        assert!((end.offset_y - (0.2 - (-40.0 * 2.0) / (2.0 * H as f64))).abs() < EPSILON);
    }

    #[test]
    fn deserialize_clamps_zoom() {
        let vp: Viewport = serde_json::from_str(r#"{"zoom": 5000.0, "offset_x": 1.0}"#).unwrap();
        assert_eq!(vp.zoom, MAX_ZOOM);
        assert_eq!(vp.offset_x, 1.0);
        assert_eq!(vp.offset_y, 0.0);
    }
}
