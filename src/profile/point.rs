use std::fmt;
use std::str::FromStr;

use crate::error::ParameterError;
use crate::math::Point2;

/// How a profile point connects to the next point in sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EdgeType {
    /// Straight line to the next point.
    Straight,
    /// Part of a smooth interpolated curve through consecutive spline points.
    Spline,
    /// Part of a circular arc through three consecutive points.
    Circle,
}

impl EdgeType {
    /// Returns the canonical lower-case tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Straight => "straight",
            Self::Spline => "spline",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeType {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "straight" => Ok(Self::Straight),
            "spline" => Ok(Self::Spline),
            "circle" => Ok(Self::Circle),
            other => Err(ParameterError::UnknownEdgeType(other.to_owned())),
        }
    }
}

/// A point of a 2D cross-section profile.
///
/// `r` is the radial coordinate and `z` the vertical one. `edge` describes the
/// segment from this point to the next; the last point connects back to the first.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfilePoint {
    pub r: f64,
    pub z: f64,
    pub edge: EdgeType,
}

impl ProfilePoint {
    /// Creates a new point with the given coordinates and edge type.
    #[must_use]
    pub fn new(r: f64, z: f64, edge: EdgeType) -> Self {
        Self { r, z, edge }
    }

    /// Creates a point followed by a straight edge.
    #[must_use]
    pub fn straight(r: f64, z: f64) -> Self {
        Self::new(r, z, EdgeType::Straight)
    }

    /// Creates a point followed by a spline edge.
    #[must_use]
    pub fn spline(r: f64, z: f64) -> Self {
        Self::new(r, z, EdgeType::Spline)
    }

    /// Creates a point followed by a circular edge.
    #[must_use]
    pub fn circle(r: f64, z: f64) -> Self {
        Self::new(r, z, EdgeType::Circle)
    }

    /// Returns the coordinates as a point.
    #[must_use]
    pub fn position(&self) -> Point2 {
        Point2::new(self.r, self.z)
    }
}

impl From<(f64, f64, EdgeType)> for ProfilePoint {
    fn from((r, z, edge): (f64, f64, EdgeType)) -> Self {
        Self::new(r, z, edge)
    }
}

impl TryFrom<(f64, f64, &str)> for ProfilePoint {
    type Error = ParameterError;

    fn try_from((r, z, edge): (f64, f64, &str)) -> Result<Self, Self::Error> {
        Ok(Self::new(r, z, edge.parse()?))
    }
}
