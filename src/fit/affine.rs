//! Fit a unit-square image onto a projected quad.
//!
//! An affine map is exact on three points, so only three of the four quad corners can be matched.
//! The three that span the largest triangle are kept; the fourth lands wherever the parallelogram
//! rule puts it. Twisted or concave quads can therefore crop or repeat part of the image.

use crate::foundation::core::{Affine, Point};

/// Unit-square corner that each quad corner is fitted to, in quad order (ll, lr, ul, ur).
///
/// Image space has +y down, so the image's top edge runs along ul-ur.
pub const UNIT_CORNERS: [Point; 4] = [
    Point::new(0.0, 1.0),
    Point::new(1.0, 1.0),
    Point::new(0.0, 0.0),
    Point::new(1.0, 0.0),
];

/// Absolute area of the triangle `a b c`.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)).abs() / 2.0
}

/// Index of the corner left out of the largest triangle formed by the other three.
///
/// Ties go to the lowest index.
pub fn largest_triangle_corner(pos: &[Point; 4]) -> usize {
    let mut best = 0;
    let mut best_area = -1.0;
    for i in 0..4 {
        let area = triangle_area(pos[(i + 1) % 4], pos[(i + 2) % 4], pos[(i + 3) % 4]);
        if area > best_area {
            best_area = area;
            best = i;
        }
    }
    best
}

/// Affine map taking [`UNIT_CORNERS`] onto `pos`, exact everywhere except the corner returned by
/// [`largest_triangle_corner`].
///
/// Degenerate quads yield a singular transform.
pub fn fit_unit_square(pos: &[Point; 4]) -> Affine {
    let omit = largest_triangle_corner(pos);
    let [p0, p1, p2, p3] = *pos;

    let x_axis = if omit == 2 || omit == 3 { p1 - p0 } else { p3 - p2 };
    let y_axis = if omit == 0 || omit == 2 { p1 - p3 } else { p0 - p2 };
    let origin = if omit == 2 {
        (p3 + (p0 - p1)).to_vec2()
    } else {
        p2.to_vec2()
    };

    Affine::new([x_axis.x, x_axis.y, y_axis.x, y_axis.y, origin.x, origin.y])
}

#[cfg(test)]
#[path = "../../tests/unit/fit/affine.rs"]
mod tests;
