//! Software rasterisation of geometric draw commands onto a [`PixelBuffer`].

use fractalgen_core::{DrawCommand, DrawSink, Point};

use crate::buffer::PixelBuffer;
use crate::palette::Rgb;

/// Draws primitives straight into a pixel buffer in a single color.
///
/// Implements [`DrawSink`], so a generator can rasterise without building
/// an intermediate draw list.
pub struct Rasterizer<'a> {
    buffer: &'a mut PixelBuffer,
    color: Rgb,
}

impl<'a> Rasterizer<'a> {
    pub fn new(buffer: &'a mut PixelBuffer, color: Rgb) -> Self {
        Self { buffer, color }
    }

    /// Replay a recorded draw list.
    pub fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            match *command {
                DrawCommand::FillTriangle(vertices) => self.fill_triangle(vertices),
                DrawCommand::StrokeLine(from, to) => self.stroke_line(from, to),
            }
        }
    }
}

/// Signed doubled area of `(a, b, p)`; positive when `p` is left of `a → b`.
#[inline]
fn edge(a: Point, b: Point, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

impl DrawSink for Rasterizer<'_> {
    /// Fill every pixel whose centre lies inside or on the triangle.
    fn fill_triangle(&mut self, [a, b, c]: [Point; 3]) {
        let area = edge(a, b, c.x, c.y);
        if area == 0.0 || !area.is_finite() {
            return;
        }
        let max_x = self.buffer.width as f64 - 1.0;
        let max_y = self.buffer.height as f64 - 1.0;
        let x0 = a.x.min(b.x).min(c.x).floor().max(0.0);
        let x1 = a.x.max(b.x).max(c.x).ceil().min(max_x);
        let y0 = a.y.min(b.y).min(c.y).floor().max(0.0);
        let y1 = a.y.max(b.y).max(c.y).ceil().min(max_y);
        if x0 > x1 || y0 > y1 {
            return;
        }

        // Normalise so "inside" is non-negative for either winding.
        let sign = area.signum();
        for y in y0 as i64..=y1 as i64 {
            let cy = y as f64 + 0.5;
            for x in x0 as i64..=x1 as i64 {
                let cx = x as f64 + 0.5;
                if sign * edge(a, b, cx, cy) >= 0.0
                    && sign * edge(b, c, cx, cy) >= 0.0
                    && sign * edge(c, a, cx, cy) >= 0.0
                {
                    self.buffer.put_pixel(x, y, self.color);
                }
            }
        }
    }

    /// One-pixel Bresenham line between the rounded endpoints.
    fn stroke_line(&mut self, from: Point, to: Point) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
        let (x_end, y_end) = (to.x.round() as i64, to.y.round() as i64);

        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.buffer.put_pixel(x, y, self.color);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::filled(w, h, Rgb::WHITE).unwrap()
    }

    #[test]
    fn horizontal_line_covers_every_column() {
        let mut buf = canvas(10, 5);
        Rasterizer::new(&mut buf, Rgb::BLACK).stroke_line(Point::new(1.0, 2.0), Point::new(8.0, 2.0));
        assert_eq!(buf.count(Rgb::BLACK), 8);
        for x in 1..=8 {
            assert_eq!(buf.pixel(x, 2), Some(Rgb::BLACK));
        }
    }

    #[test]
    fn diagonal_line_is_connected() {
        let mut buf = canvas(10, 10);
        Rasterizer::new(&mut buf, Rgb::BLACK).stroke_line(Point::new(9.0, 0.0), Point::new(0.0, 9.0));
        assert_eq!(buf.count(Rgb::BLACK), 10);
        for i in 0..10 {
            assert_eq!(buf.pixel(9 - i, i), Some(Rgb::BLACK));
        }
    }

    #[test]
    fn line_outside_canvas_is_clipped() {
        let mut buf = canvas(4, 4);
        Rasterizer::new(&mut buf, Rgb::BLACK)
            .stroke_line(Point::new(-10.0, 1.0), Point::new(10.0, 1.0));
        assert_eq!(buf.count(Rgb::BLACK), 4);
    }

    #[test]
    fn triangle_fill_is_winding_independent() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let c = Point::new(0.0, 10.0);

        let mut cw = canvas(12, 12);
        Rasterizer::new(&mut cw, Rgb::BLACK).fill_triangle([a, b, c]);
        let mut ccw = canvas(12, 12);
        Rasterizer::new(&mut ccw, Rgb::BLACK).fill_triangle([a, c, b]);

        assert_eq!(cw, ccw);
        // Pixel centres with x + y <= 9 are covered: 10 + 9 + … + 1.
        assert_eq!(cw.count(Rgb::BLACK), 55);
        assert_eq!(cw.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(cw.pixel(9, 9), Some(Rgb::WHITE));
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut buf = canvas(5, 5);
        Rasterizer::new(&mut buf, Rgb::BLACK).fill_triangle([
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(4.0, 4.0),
        ]);
        assert_eq!(buf.count(Rgb::BLACK), 0);
    }

    #[test]
    fn draw_all_replays_commands() {
        let mut buf = canvas(6, 6);
        let commands = vec![
            DrawCommand::StrokeLine(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
            DrawCommand::StrokeLine(Point::new(0.0, 5.0), Point::new(5.0, 5.0)),
        ];
        Rasterizer::new(&mut buf, Rgb::BLACK).draw_all(&commands);
        assert_eq!(buf.count(Rgb::BLACK), 12);
    }
}
