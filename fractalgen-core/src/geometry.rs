//! Recursive geometric fractals: the Sierpinski triangle and the Koch
//! snowflake.
//!
//! Both generators walk an explicit work stack instead of recursing on the
//! call stack, and emit primitives in the same pre-order, left-to-right
//! sequence the recursive formulation would.  Output goes to a [`DrawSink`]
//! so callers can either collect a draw list or rasterise on the fly.

use tracing::debug;

use crate::error::CoreError;

/// Deepest Sierpinski subdivision accepted: `3¹²` ≈ 530 thousand triangles.
pub const MAX_SIERPINSKI_DEPTH: u32 = 12;

/// Deepest Koch subdivision accepted: `3·4⁹` ≈ 790 thousand segments.
pub const MAX_KOCH_DEPTH: u32 = 9;

/// Inset of the Sierpinski base triangle from the canvas edges, in pixels.
const SIERPINSKI_MARGIN: f64 = 50.0;

/// Koch snowflake edge length as a fraction of the canvas width.
const KOCH_EDGE_FRACTION: f64 = 0.6;

/// A point in canvas pixel space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A single vector primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    FillTriangle([Point; 3]),
    StrokeLine(Point, Point),
}

/// Receives primitives as a generator produces them.
pub trait DrawSink {
    fn fill_triangle(&mut self, vertices: [Point; 3]);
    fn stroke_line(&mut self, from: Point, to: Point);
}

impl DrawSink for Vec<DrawCommand> {
    fn fill_triangle(&mut self, vertices: [Point; 3]) {
        self.push(DrawCommand::FillTriangle(vertices));
    }

    fn stroke_line(&mut self, from: Point, to: Point) {
        self.push(DrawCommand::StrokeLine(from, to));
    }
}

/// Reject a depth above `max`.
pub fn check_depth(depth: u32, max: u32) -> crate::Result<()> {
    if depth > max {
        return Err(CoreError::RecursionDepthExceeded { depth, max });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Sierpinski triangle
// ---------------------------------------------------------------------------

/// The outer triangle for a canvas: apex top-centre, base corners inset.
///
/// Vertex order is apex, bottom-right, bottom-left.
pub fn sierpinski_base(width: u32, height: u32) -> [Point; 3] {
    let (w, h) = (width as f64, height as f64);
    [
        Point::new((width / 2) as f64, SIERPINSKI_MARGIN),
        Point::new(w - SIERPINSKI_MARGIN, h - SIERPINSKI_MARGIN),
        Point::new(SIERPINSKI_MARGIN, h - SIERPINSKI_MARGIN),
    ]
}

/// Emit the `3^depth` filled triangles of a Sierpinski triangle.
pub fn sierpinski<S: DrawSink + ?Sized>(
    width: u32,
    height: u32,
    depth: u32,
    sink: &mut S,
) -> crate::Result<()> {
    check_depth(depth, MAX_SIERPINSKI_DEPTH)?;
    debug!(width, height, depth, "Subdividing Sierpinski triangle");
    sierpinski_from(sierpinski_base(width, height), depth, sink);
    Ok(())
}

/// Subdivide an arbitrary triangle `depth` times.
///
/// Each level keeps the three corner triangles (the one at vertex 0, then
/// vertex 1, then vertex 2) and drops the inverted centre.
pub fn sierpinski_from<S: DrawSink + ?Sized>(triangle: [Point; 3], depth: u32, sink: &mut S) {
    let mut stack = vec![(triangle, depth)];

    while let Some(([a, b, c], depth)) = stack.pop() {
        if depth == 0 {
            sink.fill_triangle([a, b, c]);
            continue;
        }
        let ab = a.midpoint(b);
        let bc = b.midpoint(c);
        let ca = c.midpoint(a);

        // Pushed in reverse so the corner at `a` is processed first.
        stack.push(([ca, bc, c], depth - 1));
        stack.push(([ab, b, bc], depth - 1));
        stack.push(([a, ab, ca], depth - 1));
    }
}

// ---------------------------------------------------------------------------
// Koch snowflake
// ---------------------------------------------------------------------------

/// The equilateral base triangle (apex up) centred on the canvas.
///
/// Vertex order is bottom-left, apex, bottom-right; the snowflake walks
/// the edges in that cyclic order.
pub fn koch_base(width: u32, height: u32) -> [Point; 3] {
    let w = width as f64;
    let half_w = (width / 2) as f64;
    let half_h = (height / 2) as f64;
    let length = w * KOCH_EDGE_FRACTION;
    let tri_height = length * 3f64.sqrt() / 2.0;

    [
        Point::new((w - length) / 2.0, half_h + tri_height / 3.0),
        Point::new(half_w, half_h - 2.0 * tri_height / 3.0),
        Point::new((w + length) / 2.0, half_h + tri_height / 3.0),
    ]
}

/// Emit the `3·4^depth` segments of a Koch snowflake.
pub fn koch_snowflake<S: DrawSink + ?Sized>(
    width: u32,
    height: u32,
    depth: u32,
    sink: &mut S,
) -> crate::Result<()> {
    check_depth(depth, MAX_KOCH_DEPTH)?;
    debug!(width, height, depth, "Subdividing Koch snowflake");
    let [p1, p2, p3] = koch_base(width, height);
    koch_line(p1, p2, depth, sink);
    koch_line(p2, p3, depth, sink);
    koch_line(p3, p1, depth, sink);
    Ok(())
}

/// Emit the Koch curve over the segment `start → end`.
///
/// The bump sits to the right of the direction of travel as seen on
/// screen.  [`koch_snowflake`] walks its base triangle clockwise, so its
/// bumps fold into the triangle.
pub fn koch_line<S: DrawSink + ?Sized>(start: Point, end: Point, depth: u32, sink: &mut S) {
    let sqrt3 = 3f64.sqrt();
    let mut stack = vec![(start, end, depth)];

    while let Some((p1, p5, depth)) = stack.pop() {
        if depth == 0 {
            sink.stroke_line(p1, p5);
            continue;
        }
        let dx = p5.x - p1.x;
        let dy = p5.y - p1.y;
        let p2 = Point::new(p1.x + dx / 3.0, p1.y + dy / 3.0);
        let p3 = Point::new(
            (p1.x + p5.x) / 2.0 + sqrt3 * (p1.y - p5.y) / 6.0,
            (p1.y + p5.y) / 2.0 + sqrt3 * (p5.x - p1.x) / 6.0,
        );
        let p4 = Point::new(p1.x + 2.0 * dx / 3.0, p1.y + 2.0 * dy / 3.0);

        stack.push((p4, p5, depth - 1));
        stack.push((p3, p4, depth - 1));
        stack.push((p2, p3, depth - 1));
        stack.push((p1, p2, depth - 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
    }

    fn recursive_sierpinski(t: [Point; 3], depth: u32, out: &mut Vec<DrawCommand>) {
        if depth == 0 {
            out.fill_triangle(t);
            return;
        }
        let [a, b, c] = t;
        let (ab, bc, ca) = (a.midpoint(b), b.midpoint(c), c.midpoint(a));
        recursive_sierpinski([a, ab, ca], depth - 1, out);
        recursive_sierpinski([ab, b, bc], depth - 1, out);
        recursive_sierpinski([ca, bc, c], depth - 1, out);
    }

    #[test]
    fn sierpinski_depth_zero_is_base_triangle() {
        let mut cmds = Vec::new();
        sierpinski(1200, 800, 0, &mut cmds).unwrap();
        assert_eq!(
            cmds,
            vec![DrawCommand::FillTriangle([
                Point::new(600.0, 50.0),
                Point::new(1150.0, 750.0),
                Point::new(50.0, 750.0),
            ])]
        );
    }

    #[test]
    fn sierpinski_counts() {
        for depth in 0..=7 {
            let mut cmds = Vec::new();
            sierpinski(640, 480, depth, &mut cmds).unwrap();
            assert_eq!(cmds.len(), 3usize.pow(depth), "depth {depth}");
            assert!(cmds
                .iter()
                .all(|c| matches!(c, DrawCommand::FillTriangle(_))));
        }
    }

    #[test]
    fn sierpinski_matches_recursive_order() {
        let base = sierpinski_base(1200, 800);
        let mut expected = Vec::new();
        recursive_sierpinski(base, 5, &mut expected);
        let mut actual = Vec::new();
        sierpinski_from(base, 5, &mut actual);
        assert_eq!(actual, expected);
    }

    #[test]
    fn sierpinski_first_leaf_touches_apex() {
        let mut cmds = Vec::new();
        sierpinski(1200, 800, 3, &mut cmds).unwrap();
        match cmds[0] {
            DrawCommand::FillTriangle([a, _, _]) => assert!(close(a, Point::new(600.0, 50.0))),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn koch_counts() {
        for depth in 0..=6 {
            let mut cmds = Vec::new();
            koch_snowflake(1200, 800, depth, &mut cmds).unwrap();
            assert_eq!(cmds.len(), 3 * 4usize.pow(depth), "depth {depth}");
        }
    }

    #[test]
    fn koch_depth_zero_is_closed_triangle() {
        let mut cmds = Vec::new();
        koch_snowflake(1200, 800, 0, &mut cmds).unwrap();
        let [p1, p2, p3] = koch_base(1200, 800);
        assert_eq!(
            cmds,
            vec![
                DrawCommand::StrokeLine(p1, p2),
                DrawCommand::StrokeLine(p2, p3),
                DrawCommand::StrokeLine(p3, p1),
            ]
        );
        // Equilateral with side 0.6·width.
        let side = ((p2.x - p1.x).powi(2) + (p2.y - p1.y).powi(2)).sqrt();
        assert!((side - 720.0).abs() < EPSILON);
        assert!((p3.x - p1.x - 720.0).abs() < EPSILON);
    }

    #[test]
    fn koch_segments_are_contiguous() {
        let mut cmds = Vec::new();
        koch_snowflake(900, 900, 3, &mut cmds).unwrap();
        let segments: Vec<(Point, Point)> = cmds
            .iter()
            .map(|c| match *c {
                DrawCommand::StrokeLine(a, b) => (a, b),
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        for pair in segments.windows(2) {
            assert!(close(pair[0].1, pair[1].0));
        }
        assert!(close(segments.last().unwrap().1, segments[0].0));
    }

    #[test]
    fn koch_bump_sits_right_of_travel() {
        // Travelling east in y-down space, "right" is +y.
        let mut cmds = Vec::new();
        koch_line(Point::new(0.0, 0.0), Point::new(300.0, 0.0), 1, &mut cmds);
        let DrawCommand::StrokeLine(_, tip) = cmds[1] else {
            panic!("expected a line");
        };
        assert!((tip.x - 150.0).abs() < EPSILON);
        assert!((tip.y - 300.0 * 3f64.sqrt() / 6.0).abs() < EPSILON);
    }

    #[test]
    fn koch_snowflake_bumps_face_the_centre() {
        // The bottom edge runs right-to-left (p3 → p1); its bump rises
        // towards the apex.
        let [p1, _, p3] = koch_base(1200, 800);
        let mut cmds = Vec::new();
        koch_line(p3, p1, 1, &mut cmds);
        assert_eq!(cmds.len(), 4);
        let DrawCommand::StrokeLine(_, tip) = cmds[1] else {
            panic!("expected a line");
        };
        assert!(tip.y < p1.y);
        assert!((tip.x - 600.0).abs() < EPSILON);
    }

    #[test]
    fn koch_sub_segments_have_equal_length() {
        let mut cmds = Vec::new();
        koch_line(Point::new(0.0, 0.0), Point::new(300.0, 0.0), 1, &mut cmds);
        for c in &cmds {
            let DrawCommand::StrokeLine(a, b) = *c else {
                panic!("expected a line");
            };
            let len = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
            assert!((len - 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn depth_guard() {
        let mut cmds = Vec::new();
        assert_eq!(
            sierpinski(100, 100, MAX_SIERPINSKI_DEPTH + 1, &mut cmds),
            Err(CoreError::RecursionDepthExceeded {
                depth: MAX_SIERPINSKI_DEPTH + 1,
                max: MAX_SIERPINSKI_DEPTH,
            })
        );
        assert!(koch_snowflake(100, 100, 40, &mut cmds).is_err());
        assert!(cmds.is_empty(), "nothing is emitted for a rejected depth");
        assert!(check_depth(MAX_KOCH_DEPTH, MAX_KOCH_DEPTH).is_ok());
    }

    #[test]
    fn koch_bound_is_tighter_than_sierpinski() {
        let mut cmds = Vec::new();
        assert_eq!(
            koch_snowflake(100, 100, MAX_KOCH_DEPTH + 1, &mut cmds),
            Err(CoreError::RecursionDepthExceeded {
                depth: MAX_KOCH_DEPTH + 1,
                max: MAX_KOCH_DEPTH,
            })
        );
        assert!(cmds.is_empty());

        // The same depth is still a valid Sierpinski request.
        sierpinski(100, 100, MAX_KOCH_DEPTH + 1, &mut cmds).unwrap();
        assert_eq!(cmds.len(), 3usize.pow(MAX_KOCH_DEPTH + 1));
    }
}
