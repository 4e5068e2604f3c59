use super::{Point2, TOLERANCE};

/// Signed area enclosed by `points`, treated as a closed loop in the `(r, z)` plane.
///
/// Counter-clockwise loops are positive. Fewer than three points enclose nothing.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    // Each edge pairs a point with its successor, the last wrapping to the first.
    // An explicit closing repeat adds a zero-length edge and leaves the sum unchanged.
    let twice_area: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum();
    twice_area / 2.0
}

/// Returns the `(min, max)` corners of the axis-aligned box around `points`.
///
/// `None` for an empty slice.
#[must_use]
pub fn bounds_2d(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Counts points that differ from every earlier point by more than [`TOLERANCE`].
#[must_use]
pub fn distinct_count(points: &[Point2]) -> usize {
    let mut seen: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !seen.iter().any(|q| (p - q).norm() < TOLERANCE) {
            seen.push(*p);
        }
    }
    seen.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn signed_area_ccw_square() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        assert!((signed_area_2d(&pts) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square_with_closing_vertex() {
        let pts = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 0.0),
        ];
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn closing_repeat_leaves_area_unchanged() {
        let open = vec![
            Point2::new(2.0, -1.0),
            Point2::new(5.0, 0.0),
            Point2::new(3.0, 4.0),
        ];
        let mut closed = open.clone();
        closed.push(open[0]);
        assert!((signed_area_2d(&open) - 7.0).abs() < TOLERANCE);
        assert!((signed_area_2d(&closed) - signed_area_2d(&open)).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn bounds_of_triangle() {
        let pts = [
            Point2::new(1.0, -2.0),
            Point2::new(4.0, 0.5),
            Point2::new(-1.0, 3.0),
        ];
        let (min, max) = bounds_2d(&pts).unwrap();
        assert!((min.x + 1.0).abs() < TOLERANCE);
        assert!((min.y + 2.0).abs() < TOLERANCE);
        assert!((max.x - 4.0).abs() < TOLERANCE);
        assert!((max.y - 3.0).abs() < TOLERANCE);
        assert!(bounds_2d(&[]).is_none());
    }

    #[test]
    fn distinct_count_ignores_closing_repeat() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 0.0),
        ];
        assert_eq!(distinct_count(&pts), 3);
    }
}
