use fractalgen_core::CoreError;

use crate::palette::Rgb;

/// An RGB pixel buffer representing a rendered image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Create a buffer filled with `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> crate::Result<Self> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height }.into());
        }
        let pixels = color
            .to_bytes()
            .repeat(width as usize * height as usize);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Bytes in one row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * Self::BYTES_PER_PIXEL
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * Self::BYTES_PER_PIXEL
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(Rgb::new(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }

    /// Write `color` at `(x, y)`; coordinates outside the buffer are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = self.offset(x as u32, y as u32);
        self.pixels[i..i + Self::BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
    }

    /// Number of pixels equal to `color`.
    pub fn count(&self, color: Rgb) -> usize {
        let bytes = color.to_bytes();
        self.pixels
            .chunks_exact(Self::BYTES_PER_PIXEL)
            .filter(|px| **px == bytes[..])
            .count()
    }
}
