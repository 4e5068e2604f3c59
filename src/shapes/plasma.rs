use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ParameterError, Result};
use crate::math::{linspace, Point2};
use crate::profile::{EdgeType, Profile};
use crate::validate::{require_at_least, require_count_at_least, require_finite, require_in_range};

use super::ProfileGenerator;

/// Number of X-points on the plasma boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Configuration {
    /// No X-point.
    #[default]
    NonNull,
    /// A lower X-point only.
    SingleNull,
    /// Lower and upper X-points.
    DoubleNull,
}

impl Configuration {
    /// Returns the canonical tag, e.g. `"double-null"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NonNull => "non-null",
            Self::SingleNull => "single-null",
            Self::DoubleNull => "double-null",
        }
    }

    /// Returns `true` if the boundary has a lower X-point.
    #[must_use]
    pub fn has_x_points(self) -> bool {
        !matches!(self, Self::NonNull)
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Configuration {
    type Err = ParameterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "non-null" => Ok(Self::NonNull),
            "single-null" => Ok(Self::SingleNull),
            "double-null" => Ok(Self::DoubleNull),
            other => Err(ParameterError::UnknownConfiguration(other.to_owned())),
        }
    }
}

/// X-point locations; absent points are `None`, never a placeholder coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct XPoints {
    pub lower: Option<Point2>,
    pub upper: Option<Point2>,
}

/// Closed-form landmarks of the plasma outline, independent of sampling density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointsOfInterest {
    pub high_point: Point2,
    pub low_point: Point2,
    pub outer_equatorial_point: Point2,
    pub inner_equatorial_point: Point2,
}

/// A tokamak plasma outline from the four shaping parameters.
///
/// `R(t) = R0 + a * cos(t + delta * sin(t))`, `Z(t) = kappa * a * sin(t) + Z0`
/// sampled at `num_points` angles over `[0, 2*pi]`. The last sample repeats the
/// first and is dropped, so the profile is closed implicitly and every point
/// carries a spline edge.
///
/// Single-value ranges are enforced by the setters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Plasma {
    elongation: f64,
    major_radius: f64,
    minor_radius: f64,
    triangularity: f64,
    vertical_displacement: f64,
    num_points: usize,
    configuration: Configuration,
    x_point_shift: f64,
}

impl Default for Plasma {
    fn default() -> Self {
        Self {
            elongation: 2.0,
            major_radius: 450.0,
            minor_radius: 150.0,
            triangularity: 0.55,
            vertical_displacement: 0.0,
            num_points: 50,
            configuration: Configuration::NonNull,
            x_point_shift: 0.1,
        }
    }
}

impl Plasma {
    /// Smallest `num_points` leaving three profile points after the duplicate is dropped.
    pub const MIN_NUM_POINTS: usize = 4;

    /// Creates a plasma from the main shaping parameters, other values at their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range (see the setters).
    pub fn new(
        elongation: f64,
        major_radius: f64,
        minor_radius: f64,
        triangularity: f64,
    ) -> std::result::Result<Self, ParameterError> {
        let mut plasma = Self::default();
        plasma.set_elongation(elongation)?;
        plasma.set_major_radius(major_radius)?;
        plasma.set_minor_radius(minor_radius)?;
        plasma.set_triangularity(triangularity)?;
        Ok(plasma)
    }

    #[must_use]
    pub fn elongation(&self) -> f64 {
        self.elongation
    }

    /// Sets the elongation.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::OutOfRange`] outside `[0, 10]`.
    pub fn set_elongation(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_in_range("elongation", value, 0.0, 10.0)?;
        self.elongation = value;
        Ok(())
    }

    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    /// Sets the major radius.
    ///
    /// # Errors
    ///
    /// Returns an error below 1 or if not finite.
    pub fn set_major_radius(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_at_least("major_radius", value, 1.0)?;
        self.major_radius = value;
        Ok(())
    }

    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    /// Sets the minor radius.
    ///
    /// # Errors
    ///
    /// Returns an error below 1 or if not finite.
    pub fn set_minor_radius(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_at_least("minor_radius", value, 1.0)?;
        self.minor_radius = value;
        Ok(())
    }

    #[must_use]
    pub fn triangularity(&self) -> f64 {
        self.triangularity
    }

    /// Sets the triangularity.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFinite`] for NaN or infinite values.
    pub fn set_triangularity(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_finite("triangularity", value)?;
        self.triangularity = value;
        Ok(())
    }

    #[must_use]
    pub fn vertical_displacement(&self) -> f64 {
        self.vertical_displacement
    }

    /// Sets the vertical displacement.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFinite`] for NaN or infinite values.
    pub fn set_vertical_displacement(
        &mut self,
        value: f64,
    ) -> std::result::Result<(), ParameterError> {
        require_finite("vertical_displacement", value)?;
        self.vertical_displacement = value;
        Ok(())
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Sets the number of angle samples (one more than the profile length).
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::TooFewPoints`] below [`Self::MIN_NUM_POINTS`].
    pub fn set_num_points(&mut self, value: usize) -> std::result::Result<(), ParameterError> {
        require_count_at_least("num_points", value, Self::MIN_NUM_POINTS)?;
        self.num_points = value;
        Ok(())
    }

    #[must_use]
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }

    #[must_use]
    pub fn x_point_shift(&self) -> f64 {
        self.x_point_shift
    }

    /// Sets the X-point shift.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::OutOfRange`] outside `[0, 1]`.
    pub fn set_x_point_shift(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_in_range("x_point_shift", value, 0.0, 1.0)?;
        self.x_point_shift = value;
        Ok(())
    }

    /// Re-checks every single-value range.
    ///
    /// Setters already enforce these; this catches values that bypassed them,
    /// e.g. a deserialized parameter set.
    ///
    /// # Errors
    ///
    /// Returns the first violated range.
    pub fn validate(&self) -> std::result::Result<(), ParameterError> {
        require_in_range("elongation", self.elongation, 0.0, 10.0)?;
        require_at_least("major_radius", self.major_radius, 1.0)?;
        require_at_least("minor_radius", self.minor_radius, 1.0)?;
        require_finite("triangularity", self.triangularity)?;
        require_finite("vertical_displacement", self.vertical_displacement)?;
        require_count_at_least("num_points", self.num_points, Self::MIN_NUM_POINTS)?;
        require_in_range("x_point_shift", self.x_point_shift, 0.0, 1.0)
    }

    /// Computes the X-points for the current configuration.
    ///
    /// The lower X-point sits at `r = 1 - (1 + shift) * delta * a`,
    /// `z = Z0 - (1 + shift) * kappa * a`. A double-null upper X-point mirrors it
    /// about `Z0`.
    #[must_use]
    pub fn x_points(&self) -> XPoints {
        if !self.configuration.has_x_points() {
            return XPoints::default();
        }

        let stretch = 1.0 + self.x_point_shift;
        let r = 1.0 - stretch * self.triangularity * self.minor_radius;
        let reach = stretch * self.elongation * self.minor_radius;

        let lower = Point2::new(r, self.vertical_displacement - reach);
        let upper = (self.configuration == Configuration::DoubleNull)
            .then(|| Point2::new(r, self.vertical_displacement + reach));

        XPoints {
            lower: Some(lower),
            upper,
        }
    }

    /// Returns the vertical range `(lower, upper)` the outline may occupy.
    ///
    /// X-point heights bound the outline where X-points exist; otherwise the
    /// bound is `Z0 ± kappa * a`.
    #[must_use]
    pub fn vertical_extent(&self) -> (f64, f64) {
        let reach = self.elongation * self.minor_radius;
        let x_points = self.x_points();
        let lower = x_points
            .lower
            .map_or(self.vertical_displacement - reach, |p| p.y);
        let upper = x_points
            .upper
            .map_or(self.vertical_displacement + reach, |p| p.y);
        (lower, upper)
    }

    /// Returns the closed-form landmarks of the outline.
    ///
    /// High and low points are reported relative to the midplane, without the
    /// vertical displacement.
    #[must_use]
    pub fn points_of_interest(&self) -> PointsOfInterest {
        let r0 = self.major_radius;
        let a = self.minor_radius;
        let tip_r = r0 - self.triangularity * a;
        let tip_z = self.elongation * a;
        PointsOfInterest {
            high_point: Point2::new(tip_r, tip_z),
            low_point: Point2::new(tip_r, -tip_z),
            outer_equatorial_point: Point2::new(r0 + a, 0.0),
            inner_equatorial_point: Point2::new(r0 - a, 0.0),
        }
    }

    /// Evaluates the boundary parametrization at angle `theta`.
    #[must_use]
    pub fn boundary_point(&self, theta: f64) -> Point2 {
        let r = self.major_radius
            + self.minor_radius * (theta + self.triangularity * theta.sin()).cos();
        let z = self.elongation * self.minor_radius * theta.sin() + self.vertical_displacement;
        Point2::new(r, z)
    }
}

impl ProfileGenerator for Plasma {
    fn name(&self) -> &'static str {
        "plasma"
    }

    fn find_points(&self) -> Result<Profile> {
        self.validate()?;

        let mut samples: Vec<Point2> = linspace(0.0, TAU, self.num_points)
            .into_iter()
            .map(|theta| self.boundary_point(theta))
            .collect();
        // The angular domain is closed: the last sample repeats the first.
        samples.pop();

        debug!(
            configuration = %self.configuration,
            samples = self.num_points,
            "Sampled plasma boundary"
        );
        Ok(Profile::from_positions(samples, EdgeType::Spline))
    }
}
