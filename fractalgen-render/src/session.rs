//! Interactive state between UI-triggered renders.
//!
//! A [`RenderSession`] is the only owner of the current viewport.  Input
//! handlers call its pan/zoom/reset methods and then [`RenderSession::redraw`];
//! each redraw takes an immutable snapshot of the viewport and request.

use tracing::{debug, warn};

use fractalgen_core::{CoreError, DragAnchor, ScrollDirection, Viewport};

use crate::renderer::{render, RenderOutput};
use crate::request::{RenderRequest, RequestFields};

pub struct RenderSession {
    width: u32,
    height: u32,
    viewport: Viewport,
    drag: Option<DragAnchor>,
    frame: Option<RenderOutput>,
    last_request: Option<RenderRequest>,
}

impl RenderSession {
    pub fn new(width: u32, height: u32) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height }.into());
        }
        Ok(Self {
            width,
            height,
            viewport: Viewport::default(),
            drag: None,
            frame: None,
            last_request: None,
        })
    }

    /// Start from a saved viewport instead of the default one.
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The last successfully rendered frame, if any.
    pub fn current_frame(&self) -> Option<&RenderOutput> {
        self.frame.as_ref()
    }

    /// The request that produced [`current_frame`](Self::current_frame).
    pub fn last_request(&self) -> Option<&RenderRequest> {
        self.last_request.as_ref()
    }

    /// Parse `fields` and render a new frame.
    ///
    /// On any error the previous frame is kept as-is and the error is
    /// returned for the caller to report.
    pub fn redraw(&mut self, fields: &RequestFields) -> crate::Result<&RenderOutput> {
        let request = match fields.parse() {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected render input: {e}");
                return Err(e.into());
            }
        };
        let output = match render(&request, &self.viewport, self.width, self.height) {
            Ok(output) => output,
            Err(e) => {
                warn!("Render failed: {e}");
                return Err(e);
            }
        };
        self.last_request = Some(request);
        Ok(&*self.frame.insert(output))
    }

    // -- Navigation --

    /// Primary button pressed at `(x, y)`: remember the drag anchor.
    pub fn press(&mut self, x: f64, y: f64) {
        self.drag = Some(self.viewport.begin_drag(x, y));
    }

    /// Pointer moved to `(x, y)` with the button held.
    ///
    /// Returns `true` if the viewport changed (i.e. a drag is in progress).
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(anchor) = self.drag else {
            return false;
        };
        self.viewport = anchor.apply(&self.viewport, x, y, self.width, self.height);
        true
    }

    /// Button released or pointer left the canvas.
    pub fn release(&mut self) {
        self.drag = None;
    }

    /// One scroll notch at `(x, y)`.
    pub fn scroll(&mut self, x: f64, y: f64, direction: ScrollDirection) {
        self.viewport = self
            .viewport
            .scroll(x, y, direction, self.width, self.height);
        debug!(zoom = self.viewport.zoom, "Scrolled");
    }

    /// Back to zoom 1 with no offset.  The caller redraws.
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::default();
    }

    /// Recentre the view and redraw with whatever fields are current.
    pub fn mandelbrot_preset(&mut self, fields: &RequestFields) -> crate::Result<&RenderOutput> {
        self.reset_view();
        self.redraw(fields)
    }

    /// Restore the Julia constant text and redraw; the viewport is left alone.
    pub fn julia_preset(&mut self, fields: &mut RequestFields) -> crate::Result<&RenderOutput> {
        fields.apply_julia_preset();
        self.redraw(fields)
    }

    // -- Status --

    /// The fractal-plane coordinate under pixel `(x, y)`.
    pub fn fractal_space_coordinate_of(&self, x: f64, y: f64) -> (f64, f64) {
        self.viewport
            .to_fractal_space(x, y, self.width, self.height)
    }

    /// The status bar line for the pointer at `(x, y)`.
    pub fn status_text(&self, x: f64, y: f64) -> String {
        let (fx, fy) = self.fractal_space_coordinate_of(x, y);
        format!(
            "Zoom: {:.2}x | Coordinates: ({:.4}, {:.4})",
            self.viewport.zoom, fx, fy
        )
    }
}
