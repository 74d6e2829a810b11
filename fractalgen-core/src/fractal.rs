use crate::complex::Complex;

/// `|z|²` at or beyond which an orbit counts as escaped (escape radius 2).
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// The outcome of iterating a single point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationResult {
    /// The orbit left the escape radius after `iterations` steps.
    ///
    /// Always strictly less than the iteration cap.
    Escaped { iterations: u32 },

    /// The orbit used up the whole iteration budget without being seen to
    /// escape.
    Interior,
}

impl IterationResult {
    #[inline]
    pub fn is_interior(&self) -> bool {
        matches!(self, Self::Interior)
    }
}

/// Iterate `z ← z² + c` from `z0` with a budget of `max_iterations` steps.
///
/// The magnitude is tested *before* each step, so a starting point already
/// outside the radius escapes after 0 iterations.  Running the budget down
/// to zero is reported as [`IterationResult::Interior`], even when the last
/// step happened to leave the radius.
#[inline]
pub fn escape_time(z0: Complex, c: Complex, max_iterations: u32) -> IterationResult {
    let mut z = z0;
    let mut remaining = max_iterations;

    while z.norm_sq() < ESCAPE_NORM_SQ && remaining > 0 {
        z = z.square_add(c);
        remaining -= 1;
    }

    if remaining == 0 {
        IterationResult::Interior
    } else {
        IterationResult::Escaped {
            iterations: max_iterations - remaining,
        }
    }
}

/// An escape-time fractal: each fractal-plane point is classified
/// independently by iterating the quadratic recurrence.
///
/// Renderers are generic over `F: EscapeTime` (static dispatch).
pub trait EscapeTime {
    /// Classify one point of the fractal plane.
    fn evaluate(&self, point: Complex) -> IterationResult;

    /// The iteration cap this fractal was built with.
    fn max_iterations(&self) -> u32;
}
