use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{ParameterError, Result, SolverError};
use crate::math::{linspace, Point2, TOLERANCE};
use crate::profile::{EdgeType, Profile};
use crate::validate::{require_count_at_least, require_finite};

use super::plasma::{Configuration, Plasma, PointsOfInterest, XPoints};
use super::ProfileGenerator;

/// Shaping inputs handed to a [`BoundarySolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverInput {
    /// Solver parameter `A`.
    pub a: f64,
    /// `minor_radius / major_radius`.
    pub aspect_ratio: f64,
    pub elongation: f64,
    pub triangularity: f64,
}

/// An external flux-surface solver producing raw boundary points.
///
/// Points are in a normalized frame: lengths divided by the major radius,
/// centred on `z = 0`. The solver is called synchronously and its errors are
/// passed through untouched.
pub trait BoundarySolver {
    /// Computes the boundary for `input` in the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] for parameter combinations the solver cannot handle.
    fn solve(
        &self,
        input: &SolverInput,
        configuration: Configuration,
    ) -> std::result::Result<Vec<Point2>, SolverError>;
}

impl<F> BoundarySolver for F
where
    F: Fn(&SolverInput, Configuration) -> std::result::Result<Vec<Point2>, SolverError>,
{
    fn solve(
        &self,
        input: &SolverInput,
        configuration: Configuration,
    ) -> std::result::Result<Vec<Point2>, SolverError> {
        self(input, configuration)
    }
}

/// Normalized analytic boundary, for running the solver-backed path without a
/// third-party solver.
///
/// Returns `r = 1 + eps * cos(t + delta * sin(t))`, `z = kappa * eps * sin(t)`
/// with `eps` the aspect ratio, sampled at `num_points` angles over `[0, 2*pi]`.
/// `A` and the configuration are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticBoundarySolver {
    num_points: usize,
}

impl AnalyticBoundarySolver {
    /// Creates a solver sampling `num_points` angles.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::TooFewPoints`] below [`Plasma::MIN_NUM_POINTS`].
    pub fn new(num_points: usize) -> std::result::Result<Self, ParameterError> {
        require_count_at_least("num_points", num_points, Plasma::MIN_NUM_POINTS)?;
        Ok(Self { num_points })
    }

    #[must_use]
    pub fn num_points(&self) -> usize {
        self.num_points
    }
}

impl Default for AnalyticBoundarySolver {
    fn default() -> Self {
        Self { num_points: 50 }
    }
}

impl BoundarySolver for AnalyticBoundarySolver {
    fn solve(
        &self,
        input: &SolverInput,
        _configuration: Configuration,
    ) -> std::result::Result<Vec<Point2>, SolverError> {
        let eps = input.aspect_ratio;
        Ok(linspace(0.0, TAU, self.num_points)
            .into_iter()
            .map(|t| {
                Point2::new(
                    1.0 + eps * (t + input.triangularity * t.sin()).cos(),
                    input.elongation * eps * t.sin(),
                )
            })
            .collect())
    }
}

/// A plasma outline computed by an external [`BoundarySolver`].
///
/// The raw normalized points are shifted by the vertical displacement, scaled
/// by the major radius, truncated to the vertical extent allowed by the
/// current X-points, and the closing point is dropped. Shaping parameters and
/// derived points are those of the wrapped [`Plasma`]; its `num_points` is not
/// used, the solver decides the sampling.
///
/// With the `serde` feature the parameters (de)serialize without the solver,
/// which is rebuilt from `S::default()`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "", deserialize = "S: Default"))
)]
pub struct PlasmaBoundaries<S> {
    #[cfg_attr(feature = "serde", serde(default))]
    plasma: Plasma,
    #[cfg_attr(feature = "serde", serde(default = "default_a"))]
    a: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    solver: S,
}

#[cfg(feature = "serde")]
fn default_a() -> f64 {
    DEFAULT_SOLVER_A
}

const DEFAULT_SOLVER_A: f64 = 0.05;

impl<S: BoundarySolver> PlasmaBoundaries<S> {
    /// Default value of the solver parameter `A`.
    pub const DEFAULT_A: f64 = DEFAULT_SOLVER_A;

    /// Creates a generator with default plasma parameters.
    #[must_use]
    pub fn new(solver: S) -> Self {
        Self::with_plasma(Plasma::default(), solver)
    }

    /// Creates a generator from existing plasma parameters.
    #[must_use]
    pub fn with_plasma(plasma: Plasma, solver: S) -> Self {
        Self {
            plasma,
            a: Self::DEFAULT_A,
            solver,
        }
    }

    #[must_use]
    pub fn plasma(&self) -> &Plasma {
        &self.plasma
    }

    pub fn plasma_mut(&mut self) -> &mut Plasma {
        &mut self.plasma
    }

    /// Returns the solver parameter `A`.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.a
    }

    /// Sets the solver parameter `A`.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::NonFinite`] for NaN or infinite values.
    pub fn set_a(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_finite("A", value)?;
        self.a = value;
        Ok(())
    }

    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Returns the inputs the solver is called with.
    #[must_use]
    pub fn solver_input(&self) -> SolverInput {
        SolverInput {
            a: self.a,
            aspect_ratio: self.plasma.minor_radius() / self.plasma.major_radius(),
            elongation: self.plasma.elongation(),
            triangularity: self.plasma.triangularity(),
        }
    }

    #[must_use]
    pub fn x_points(&self) -> XPoints {
        self.plasma.x_points()
    }

    #[must_use]
    pub fn points_of_interest(&self) -> PointsOfInterest {
        self.plasma.points_of_interest()
    }
}

impl<S: BoundarySolver> ProfileGenerator for PlasmaBoundaries<S> {
    fn name(&self) -> &'static str {
        "plasma_boundaries"
    }

    fn find_points(&self) -> Result<Profile> {
        self.plasma.validate()?;
        require_finite("A", self.a)?;

        let configuration = self.plasma.configuration();
        let raw = self.solver.solve(&self.solver_input(), configuration)?;
        let raw_count = raw.len();

        let shift = self.plasma.vertical_displacement();
        let scale = self.plasma.major_radius();
        let (lower, upper) = self.plasma.vertical_extent();
        // Bounds are inclusive; the slack absorbs rounding from the rescale.
        let slack = TOLERANCE * lower.abs().max(upper.abs()).max(1.0);

        let mut kept: Vec<Point2> = raw
            .into_iter()
            .map(|p| Point2::new(p.x * scale, (p.y + shift) * scale))
            .filter(|p| p.y >= lower - slack && p.y <= upper + slack)
            .collect();
        let truncated = raw_count - kept.len();
        kept.pop();

        debug!(
            %configuration,
            raw = raw_count,
            truncated,
            lower,
            upper,
            "Rescaled solver boundary"
        );

        let profile = Profile::from_positions(kept, EdgeType::Spline);
        profile.validate()?;
        Ok(profile)
    }
}
