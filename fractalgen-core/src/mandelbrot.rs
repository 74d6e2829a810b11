use crate::complex::Complex;
use crate::fractal::{escape_time, EscapeTime, IterationResult};

/// The Mandelbrot set: `z ← z² + c` with `c` fixed to the pixel's point.
///
/// The orbit starts at the point itself rather than at zero, which skips
/// the trivial first step `0² + c = c` while still counting it against the
/// budget.  Escape counts are therefore one lower than the textbook
/// formulation.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    max_iterations: u32,
}

impl Mandelbrot {
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl EscapeTime for Mandelbrot {
    #[inline]
    fn evaluate(&self, point: Complex) -> IterationResult {
        escape_time(point, point, self.max_iterations)
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
