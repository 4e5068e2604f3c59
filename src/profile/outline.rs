use crate::error::GeometryError;
use crate::math::arc_2d::{arc_sweep, circle_through};
use crate::math::polygon_2d::{bounds_2d, distinct_count, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

use super::{EdgeType, ProfilePoint};

/// How the outline returns to its first point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closure {
    /// The first point is repeated as the last point.
    Explicit,
    /// The last point connects back to the first without repeating it.
    Implicit,
}

/// Traversal direction of a closed outline in the `(r, z)` plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    /// Zero enclosed area.
    Degenerate,
}

/// One kernel-facing edge of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeRun {
    /// A straight segment.
    Line { start: Point2, end: Point2 },
    /// A smooth curve interpolating `points` in order.
    ///
    /// When `closed` is set the curve also returns from the last point to the first.
    Spline { points: Vec<Point2>, closed: bool },
    /// A circular arc from `start` through `through` to `end`.
    Arc {
        start: Point2,
        through: Point2,
        end: Point2,
        center: Point2,
        radius: f64,
        /// Signed sweep in radians, positive counter-clockwise.
        sweep: f64,
    },
}

/// An ordered, closed 2D outline made of [`ProfilePoint`]s.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Profile {
    points: Vec<ProfilePoint>,
}

impl Profile {
    /// Creates a profile from points in traversal order. No validation is done.
    #[must_use]
    pub fn new(points: Vec<ProfilePoint>) -> Self {
        Self { points }
    }

    /// Creates a profile whose points all carry the same edge type.
    pub fn from_positions(positions: impl IntoIterator<Item = Point2>, edge: EdgeType) -> Self {
        Self {
            points: positions
                .into_iter()
                .map(|p| ProfilePoint::new(p.x, p.y, edge))
                .collect(),
        }
    }

    /// Returns the points in traversal order.
    #[must_use]
    pub fn points(&self) -> &[ProfilePoint] {
        &self.points
    }

    /// Consumes the profile, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<ProfilePoint> {
        self.points
    }

    /// Returns the number of listed points, including a repeated closing point.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the profile has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProfilePoint> {
        self.points.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&ProfilePoint> {
        self.points.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ProfilePoint> {
        self.points.last()
    }

    /// Returns the coordinates of every listed point.
    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        self.points.iter().map(ProfilePoint::position).collect()
    }

    /// Returns the points as `(r, z, edge)` tuples.
    #[must_use]
    pub fn to_tuples(&self) -> Vec<(f64, f64, EdgeType)> {
        self.points.iter().map(|p| (p.r, p.z, p.edge)).collect()
    }

    /// Reports whether the closing point is listed explicitly.
    #[must_use]
    pub fn closure(&self) -> Closure {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last))
                if self.points.len() > 1
                    && (first.position() - last.position()).norm() < TOLERANCE =>
            {
                Closure::Explicit
            }
            _ => Closure::Implicit,
        }
    }

    /// Points of one full traversal, without a repeated closing point.
    fn cycle(&self) -> &[ProfilePoint] {
        match self.closure() {
            Closure::Explicit => &self.points[..self.points.len() - 1],
            Closure::Implicit => &self.points,
        }
    }

    /// Signed area of the polygon through the listed points.
    ///
    /// Curved edges are treated as chords.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.positions())
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        let area = self.signed_area();
        if area > TOLERANCE {
            Orientation::CounterClockwise
        } else if area < -TOLERANCE {
            Orientation::Clockwise
        } else {
            Orientation::Degenerate
        }
    }

    /// Returns the `(min, max)` corners of the box around the listed points.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point2, Point2)> {
        bounds_2d(&self.positions())
    }

    /// Checks that the outline can bound a solid.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewPoints`] if fewer than 3 distinct points are listed.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let count = distinct_count(&self.positions());
        if count < 3 {
            return Err(GeometryError::TooFewPoints { count });
        }
        Ok(())
    }

    /// Groups the outline into the edges a solid kernel builds.
    ///
    /// - each `straight` point starts a line to the next point
    /// - a maximal run of `spline` points, plus the point ending it, is one spline
    /// - `circle` points pair up: each pair and the following point form one arc
    ///
    /// A profile made only of spline points becomes a single closed spline.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile has fewer than 3 distinct points, a circle
    /// run has an odd number of segments, or an arc's three points are collinear.
    pub fn edge_runs(&self) -> Result<Vec<EdgeRun>, GeometryError> {
        self.validate()?;
        let cycle = self.cycle();
        let m = cycle.len();
        let at = |i: usize| cycle[i % m].position();
        let kind = |i: usize| cycle[i % m].edge;

        // Start on a run boundary so no run wraps past the end.
        let Some(start) = (0..m).find(|&i| kind(i + m - 1) != kind(i)) else {
            return uniform_runs(cycle);
        };

        let end = start + m;
        let mut runs = Vec::new();
        let mut i = start;
        while i < end {
            let edge = kind(i);
            let mut j = i + 1;
            while j < end && kind(j) == edge {
                j += 1;
            }
            match edge {
                EdgeType::Straight => {
                    runs.extend((i..j).map(|k| EdgeRun::Line {
                        start: at(k),
                        end: at(k + 1),
                    }));
                }
                EdgeType::Spline => runs.push(EdgeRun::Spline {
                    points: (i..=j).map(at).collect(),
                    closed: false,
                }),
                EdgeType::Circle => {
                    if (j - i) % 2 != 0 {
                        return Err(GeometryError::MalformedCircle { index: i % m });
                    }
                    for k in (i..j).step_by(2) {
                        runs.push(arc_run(at(k), at(k + 1), at(k + 2), k % m)?);
                    }
                }
            }
            i = j;
        }
        Ok(runs)
    }
}

impl<'a> IntoIterator for &'a Profile {
    type Item = &'a ProfilePoint;
    type IntoIter = std::slice::Iter<'a, ProfilePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<ProfilePoint>> for Profile {
    fn from(points: Vec<ProfilePoint>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<ProfilePoint> for Profile {
    fn from_iter<I: IntoIterator<Item = ProfilePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Edge runs of a cycle whose points all share one edge type.
fn uniform_runs(cycle: &[ProfilePoint]) -> Result<Vec<EdgeRun>, GeometryError> {
    let m = cycle.len();
    let at = |i: usize| cycle[i % m].position();
    match cycle[0].edge {
        EdgeType::Straight => Ok((0..m)
            .map(|i| EdgeRun::Line {
                start: at(i),
                end: at(i + 1),
            })
            .collect()),
        EdgeType::Spline => Ok(vec![EdgeRun::Spline {
            points: cycle.iter().map(ProfilePoint::position).collect(),
            closed: true,
        }]),
        EdgeType::Circle => {
            if m % 2 != 0 {
                return Err(GeometryError::MalformedCircle { index: 0 });
            }
            (0..m)
                .step_by(2)
                .map(|k| arc_run(at(k), at(k + 1), at(k + 2), k))
                .collect()
        }
    }
}

fn arc_run(
    start: Point2,
    through: Point2,
    end: Point2,
    index: usize,
) -> Result<EdgeRun, GeometryError> {
    let (center, radius) =
        circle_through(start, through, end).ok_or(GeometryError::MalformedCircle { index })?;
    Ok(EdgeRun::Arc {
        start,
        through,
        end,
        center,
        radius,
        sweep: arc_sweep(center, start, through, end),
    })
}
