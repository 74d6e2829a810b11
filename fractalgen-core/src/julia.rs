use crate::complex::Complex;
use crate::fractal::{escape_time, EscapeTime, IterationResult};

/// A Julia set: `z ← z² + c`, where `c` is a fixed constant and the orbit
/// starts at the pixel's point.
#[derive(Debug, Clone)]
pub struct Julia {
    max_iterations: u32,

    /// The fixed constant `c` that defines this Julia set.
    c: Complex,
}

impl Julia {
    /// The preset constant: `c = -0.7 + 0.27015i`.
    pub const DEFAULT_C: Complex = Complex {
        re: -0.7,
        im: 0.27015,
    };

    pub fn new(c: Complex, max_iterations: u32) -> Self {
        Self { max_iterations, c }
    }
}

impl EscapeTime for Julia {
    #[inline]
    fn evaluate(&self, point: Complex) -> IterationResult {
        escape_time(point, self.c, self.max_iterations)
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
