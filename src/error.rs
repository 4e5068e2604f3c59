use thiserror::Error;

/// Top-level error type for profile generation.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// A single parameter value outside its own valid range.
///
/// Raised eagerly, when the value is assigned.
#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("{parameter} ({value}) is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{parameter} ({value}) must be at least {min}")]
    TooFewPoints {
        parameter: &'static str,
        value: usize,
        min: usize,
    },

    #[error("{parameter} ({value}) is not a finite number")]
    NonFinite { parameter: &'static str, value: f64 },

    #[error("unknown edge type: {0:?}")]
    UnknownEdgeType(String),

    #[error("unknown plasma configuration: {0:?}")]
    UnknownConfiguration(String),

    #[error("unknown workplane: {0:?}")]
    UnknownWorkplane(String),
}

/// A relation between parameters that makes the outline impossible.
///
/// Detected when the profile is generated.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("{lesser} ({lesser_value}) is larger than {greater} ({greater_value})")]
    NotLessThan {
        lesser: &'static str,
        lesser_value: f64,
        greater: &'static str,
        greater_value: f64,
    },

    #[error("profile has {count} distinct points, at least 3 are needed to bound a solid")]
    TooFewPoints { count: usize },

    #[error("circle edge starting at point {index} does not form an arc through three points")]
    MalformedCircle { index: usize },
}

/// Failure reported by an external boundary solver, passed through untouched.
#[derive(Debug, Error)]
#[error("boundary solver failed: {source}")]
pub struct SolverError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl SolverError {
    /// Wraps the solver's own error.
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the solver's original error.
    #[must_use]
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Convenience type alias for results using [`ProfileError`].
pub type Result<T> = std::result::Result<T, ProfileError>;
