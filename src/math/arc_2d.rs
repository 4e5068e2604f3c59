//! 2D circle math for `circle` edge runs.
//!
//! A circle edge is described by three consecutive profile points: start,
//! a point the arc passes through, and end.

use super::{Point2, TOLERANCE};

/// Circle passing through three points, as `(center, radius)`.
///
/// Returns `None` when the points are collinear (or coincide), since no finite
/// circle passes through them.
#[must_use]
pub fn circle_through(a: Point2, b: Point2, c: Point2) -> Option<(Point2, f64)> {
    // Determinant of the perpendicular-bisector system; zero for collinear input.
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < TOLERANCE {
        return None;
    }

    let a2 = a.x * a.x + a.y * a.y;
    let b2 = b.x * b.x + b.y * b.y;
    let c2 = c.x * c.x + c.y * c.y;

    let cx = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let cy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = Point2::new(cx, cy);

    Some((center, (a - center).norm()))
}

/// Signed sweep of the arc `start -> through -> end` around `center`.
///
/// Positive for counter-clockwise travel. The magnitude lies in `(0, 2*pi)`.
#[must_use]
pub fn arc_sweep(center: Point2, start: Point2, through: Point2, end: Point2) -> f64 {
    use std::f64::consts::TAU;

    let angle = |p: Point2| (p.y - center.y).atan2(p.x - center.x);
    let ccw = |from: f64, to: f64| (to - from).rem_euclid(TAU);

    let a0 = angle(start);
    let am = angle(through);
    let a1 = angle(end);

    let ccw_total = ccw(a0, a1);
    if ccw(a0, am) <= ccw_total {
        ccw_total
    } else {
        ccw_total - TAU
    }
}
