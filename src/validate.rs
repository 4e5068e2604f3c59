//! Parameter checks shared by the profile generators.
//!
//! Single-value checks return [`ParameterError`] and run when a value is
//! assigned. Cross-parameter checks return [`GeometryError`] and run just
//! before points are computed. NaN never passes a check.

use crate::error::{GeometryError, ParameterError};

/// Checks that `value` is finite.
///
/// # Errors
///
/// Returns [`ParameterError::NonFinite`] for NaN or infinite values.
pub fn require_finite(parameter: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { parameter, value })
    }
}

/// Checks that `min <= value <= max`.
///
/// # Errors
///
/// Returns [`ParameterError::OutOfRange`] otherwise.
pub fn require_in_range(
    parameter: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ParameterError> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            parameter,
            value,
            min,
            max,
        })
    }
}

/// Checks that `value` is finite and at least `min`.
///
/// # Errors
///
/// Returns [`ParameterError::OutOfRange`] otherwise.
pub fn require_at_least(
    parameter: &'static str,
    value: f64,
    min: f64,
) -> Result<(), ParameterError> {
    require_finite(parameter, value)?;
    require_in_range(parameter, value, min, f64::INFINITY)
}

/// Checks that a count is at least `min`.
///
/// # Errors
///
/// Returns [`ParameterError::TooFewPoints`] otherwise.
pub fn require_count_at_least(
    parameter: &'static str,
    value: usize,
    min: usize,
) -> Result<(), ParameterError> {
    if value >= min {
        Ok(())
    } else {
        Err(ParameterError::TooFewPoints {
            parameter,
            value,
            min,
        })
    }
}

/// Checks that `lesser_value < greater_value`.
///
/// # Errors
///
/// Returns [`GeometryError::NotLessThan`] carrying both names and values.
pub fn require_less_than(
    lesser: &'static str,
    lesser_value: f64,
    greater: &'static str,
    greater_value: f64,
) -> Result<(), GeometryError> {
    if lesser_value < greater_value {
        Ok(())
    } else {
        Err(GeometryError::NotLessThan {
            lesser,
            lesser_value,
            greater,
            greater_value,
        })
    }
}
