mod cache;
mod center_column;
mod plasma;
mod plasma_boundaries;
mod princeton_d;

pub use cache::ProfileCache;
pub use center_column::CenterColumnShieldFlatTopHyperbola;
pub use plasma::{Configuration, Plasma, PointsOfInterest, XPoints};
pub use plasma_boundaries::{AnalyticBoundarySolver, BoundarySolver, PlasmaBoundaries, SolverInput};
pub use princeton_d::ToroidalFieldCoilPrincetonD;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{ParameterError, Result};
use crate::profile::Profile;
use crate::validate::{require_finite, require_in_range};

/// Computes a profile from a set of shape parameters.
pub trait ProfileGenerator {
    /// Short name of the component, used in log output.
    fn name(&self) -> &'static str;

    /// Validates the current parameters and computes the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters describe an impossible outline or an
    /// external solver fails.
    fn find_points(&self) -> Result<Profile>;

    /// How the solid kernel should turn the profile into a solid.
    fn default_operation(&self) -> Operation {
        Operation::default()
    }
}

/// Plane in which a profile is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Workplane {
    XY,
    #[default]
    XZ,
    YZ,
}

impl Workplane {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::XY => "XY",
            Self::XZ => "XZ",
            Self::YZ => "YZ",
        }
    }
}

impl fmt::Display for Workplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Workplane {
    type Err = ParameterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "XY" => Ok(Self::XY),
            "XZ" => Ok(Self::XZ),
            "YZ" => Ok(Self::YZ),
            other => Err(ParameterError::UnknownWorkplane(other.to_owned())),
        }
    }
}

/// Solid-building hint handed to the kernel together with the profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum Operation {
    /// Revolve the profile about the workplane's vertical axis.
    Rotate {
        angle_degrees: f64,
        workplane: Workplane,
    },
    /// Extrude the profile normal to the workplane.
    Extrude { distance: f64, workplane: Workplane },
}

impl Operation {
    /// Creates a rotation by `angle_degrees` in `(0, 360]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::OutOfRange`] for angles outside `(0, 360]`.
    pub fn rotate(
        angle_degrees: f64,
        workplane: Workplane,
    ) -> std::result::Result<Self, ParameterError> {
        require_in_range("rotation_angle", angle_degrees, f64::MIN_POSITIVE, 360.0)?;
        Ok(Self::Rotate {
            angle_degrees,
            workplane,
        })
    }

    /// Creates an extrusion over a positive finite `distance`.
    ///
    /// # Errors
    ///
    /// Returns an error if `distance` is not positive and finite.
    pub fn extrude(
        distance: f64,
        workplane: Workplane,
    ) -> std::result::Result<Self, ParameterError> {
        require_finite("distance", distance)?;
        require_in_range("distance", distance, f64::MIN_POSITIVE, f64::INFINITY)?;
        Ok(Self::Extrude {
            distance,
            workplane,
        })
    }

    #[must_use]
    pub fn workplane(&self) -> Workplane {
        match self {
            Self::Rotate { workplane, .. } | Self::Extrude { workplane, .. } => *workplane,
        }
    }
}

impl Default for Operation {
    /// A full revolution on the `XZ` workplane.
    fn default() -> Self {
        Self::Rotate {
            angle_degrees: 360.0,
            workplane: Workplane::XZ,
        }
    }
}

/// A parametric component: its generator, its solid hint and its cached profile.
///
/// Each instance owns its parameters and profile exclusively. Any mutable
/// access to the parameters drops the cached profile, so a read after a
/// parameter change always sees the new values. The operation hint follows
/// the generator's default until one is set explicitly.
#[derive(Debug, Clone)]
pub struct Shape<G> {
    generator: G,
    operation: Option<Operation>,
    cache: ProfileCache,
}

impl<G: ProfileGenerator> Shape<G> {
    /// Wraps `generator` with an empty cache.
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            operation: None,
            cache: ProfileCache::new(),
        }
    }

    /// Replaces the operation hint.
    #[must_use]
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    /// Returns the shape parameters.
    #[must_use]
    pub fn params(&self) -> &G {
        &self.generator
    }

    /// Returns the shape parameters for mutation, invalidating the cached profile.
    pub fn params_mut(&mut self) -> &mut G {
        self.cache.invalidate();
        &mut self.generator
    }

    /// Returns the profile for the current parameters, generating it if needed.
    ///
    /// # Errors
    ///
    /// Returns the generator's error; no partial profile is kept.
    pub fn points(&mut self) -> Result<&Profile> {
        let generator = &self.generator;
        self.cache.get_or_try_insert_with(|| -> Result<Profile> {
            let profile = generator.find_points()?;
            debug!(
                shape = generator.name(),
                points = profile.len(),
                "Generated profile"
            );
            Ok(profile)
        })
    }

    /// Overrides the profile with `profile`, stored without validation.
    ///
    /// The override holds until the parameters are next mutated.
    pub fn set_points(&mut self, profile: impl Into<Profile>) {
        self.cache.store(profile.into());
    }

    /// Returns the explicit operation, or the generator's default for its current parameters.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation.unwrap_or_else(|| self.generator.default_operation())
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = Some(operation);
    }

    /// Unwraps the generator, discarding the cached profile.
    #[must_use]
    pub fn into_inner(self) -> G {
        self.generator
    }
}

impl<G: ProfileGenerator + Default> Default for Shape<G> {
    fn default() -> Self {
        Self::new(G::default())
    }
}
