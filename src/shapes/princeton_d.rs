use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::error::{ParameterError, Result};
use crate::math::quadrature::simpson;
use crate::math::{linspace, Point2};
use crate::profile::{Profile, ProfilePoint};
use crate::validate::{require_at_least, require_count_at_least, require_finite, require_less_than};

use super::{Operation, ProfileGenerator, Workplane};

/// Simpson panels per sample interval when integrating the D height.
const PANELS_PER_SAMPLE: usize = 8;

/// A toroidal field coil with a constant-tension Princeton-D outline.
///
/// The coil cross-section is the band between two D curves. The inner D runs
/// from a vertical leg at `r1 + thickness` out to `r2`; the outer D is its
/// offset by `thickness`, from `r1` out to `r2 + thickness`. Both curves are
/// splines joined by straight bridges at the ends of the vertical legs. The
/// straight inner leg itself is left open; it is a separate rectangle given by
/// [`Self::inner_leg_connection_points`].
///
/// The D follows `z'' = -(1 + z'^2)^(3/2) / (k r)` with `k = ln(r2 / r_leg) / 2`,
/// sampled through its tangent angle so the vertical ends stay well conditioned.
///
/// Each coil is extruded by `distance` and `number_of_coils` copies are spaced
/// evenly around the machine axis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToroidalFieldCoilPrincetonD {
    r1: f64,
    r2: f64,
    thickness: f64,
    distance: f64,
    number_of_coils: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    vertical_displacement: f64,
    #[cfg_attr(feature = "serde", serde(default = "default_num_points"))]
    num_points: usize,
}

#[cfg(feature = "serde")]
fn default_num_points() -> usize {
    ToroidalFieldCoilPrincetonD::DEFAULT_NUM_POINTS
}

impl ToroidalFieldCoilPrincetonD {
    /// Samples per half D unless changed.
    pub const DEFAULT_NUM_POINTS: usize = 101;

    /// Smallest number of samples per half D.
    pub const MIN_NUM_POINTS: usize = 3;

    /// Creates a coil with no vertical displacement and the default sampling.
    ///
    /// # Arguments
    ///
    /// * `r1` - Radius of the coil's innermost face (the inner leg)
    /// * `r2` - Radius where the inner D meets the midplane
    /// * `thickness` - Radial thickness of the coil conductor
    /// * `distance` - Extrusion depth of one coil
    /// * `number_of_coils` - Coils placed around the machine axis
    ///
    /// # Errors
    ///
    /// Returns an error if any value is out of range (see the setters).
    pub fn new(
        r1: f64,
        r2: f64,
        thickness: f64,
        distance: f64,
        number_of_coils: usize,
    ) -> std::result::Result<Self, ParameterError> {
        let mut coil = Self {
            r1: 1.0,
            r2: 2.0,
            thickness: 1.0,
            distance: 1.0,
            number_of_coils: 1,
            vertical_displacement: 0.0,
            num_points: Self::DEFAULT_NUM_POINTS,
        };
        coil.set_r1(r1)?;
        coil.set_r2(r2)?;
        coil.set_thickness(thickness)?;
        coil.set_distance(distance)?;
        coil.set_number_of_coils(number_of_coils)?;
        Ok(coil)
    }

    #[must_use]
    pub fn r1(&self) -> f64 {
        self.r1
    }

    /// Sets the inner leg radius.
    ///
    /// # Errors
    ///
    /// Returns an error unless `value` is positive and finite.
    pub fn set_r1(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_at_least("r1", value, f64::MIN_POSITIVE)?;
        self.r1 = value;
        Ok(())
    }

    #[must_use]
    pub fn r2(&self) -> f64 {
        self.r2
    }

    /// Sets the outboard radius of the inner D.
    ///
    /// # Errors
    ///
    /// Returns an error unless `value` is positive and finite.
    pub fn set_r2(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_at_least("r2", value, f64::MIN_POSITIVE)?;
        self.r2 = value;
        Ok(())
    }

    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Sets the radial conductor thickness.
    ///
    /// # Errors
    ///
    /// Returns an error unless `value` is positive and finite.
    pub fn set_thickness(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_at_least("thickness", value, f64::MIN_POSITIVE)?;
        self.thickness = value;
        Ok(())
    }

    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Sets the extrusion depth.
    ///
    /// # Errors
    ///
    /// Returns an error unless `value` is positive and finite.
    pub fn set_distance(&mut self, value: f64) -> std::result::Result<(), ParameterError> {
        require_at_least("distance", value, f64::MIN_POSITIVE)?;
        self.distance = value;
        Ok(())
    }

    #[must_use]
    pub fn number_of_coils(&self) -> usize {
        self.number_of_coils
    }

    /// Sets how many coils surround the machine axis.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::TooFewPoints`] for zero coils.
    pub fn set_number_of_coils(&mut self, value: usize) -> std::result::Result<(), ParameterError> {
        require_count_at_least("number_of_coils", value, 1)?;
        self.number_of_coils = value;
        Ok(())
    }

    #[must_use]
    pub fn vertical_displacement(&self) -> f64 {
        self.vertical_displacement
    }

    /// Sets the vertical offset applied to every point.
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

    /// Sets the number of samples per half D, both ends included.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::TooFewPoints`] below [`Self::MIN_NUM_POINTS`].
    pub fn set_num_points(&mut self, value: usize) -> std::result::Result<(), ParameterError> {
        require_count_at_least("num_points", value, Self::MIN_NUM_POINTS)?;
        self.num_points = value;
        Ok(())
    }

    /// Azimuthal placement of each coil in degrees, starting at zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn coil_angles(&self) -> Vec<f64> {
        let step = 360.0 / self.number_of_coils as f64;
        (0..self.number_of_coils).map(|i| step * i as f64).collect()
    }

    /// Corners of the straight inner leg joining the two D curves.
    ///
    /// Ordered inner top, inner bottom, outer bottom, outer top, matching the
    /// ends of the spline runs in [`ProfileGenerator::find_points`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ProfileGenerator::find_points`].
    pub fn inner_leg_connection_points(&self) -> Result<[Point2; 4]> {
        self.validate()?;
        let half_height = self.upper_half()[0].1.y;
        let inner = self.r1 + self.thickness;
        let dz = self.vertical_displacement;
        Ok([
            Point2::new(inner, half_height + dz),
            Point2::new(inner, -half_height + dz),
            Point2::new(self.r1, -half_height + dz),
            Point2::new(self.r1, half_height + dz),
        ])
    }

    /// The inner leg as a straight-edged profile, extruded like the coil.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`ProfileGenerator::find_points`].
    pub fn inner_leg(&self) -> Result<Profile> {
        let corners = self.inner_leg_connection_points()?;
        Ok(corners.into_iter().map(|p| ProfilePoint::straight(p.x, p.y)).collect())
    }

    fn validate(&self) -> Result<()> {
        require_at_least("r1", self.r1, f64::MIN_POSITIVE)?;
        require_at_least("thickness", self.thickness, f64::MIN_POSITIVE)?;
        require_finite("r2", self.r2)?;
        require_finite("vertical_displacement", self.vertical_displacement)?;
        require_count_at_least("num_points", self.num_points, Self::MIN_NUM_POINTS)?;
        require_less_than("r1 + thickness", self.r1 + self.thickness, "r2", self.r2)?;
        Ok(())
    }

    /// Upper half of the inner D with its tangent angles, from the top of the
    /// inner leg over the crown down to `(r2, 0)`.
    ///
    /// With `phi` the tangent angle, `r = r0 * exp(-k sin(phi))` and
    /// `z = -k r0 * integral(sin(u) exp(-k sin(u)), -pi/2, phi)`, which puts
    /// `(r2, 0)` at `phi = -pi/2` and the inner leg at `phi = pi/2`.
    fn upper_half(&self) -> Vec<(f64, Point2)> {
        let leg = self.r1 + self.thickness;
        let r0 = (leg * self.r2).sqrt();
        let k = 0.5 * (self.r2 / leg).ln();
        let integrand = |u: f64| u.sin() * (-k * u.sin()).exp();

        let angles = linspace(-FRAC_PI_2, FRAC_PI_2, self.num_points);
        let mut integral = 0.0;
        let mut previous = -FRAC_PI_2;
        let mut half: Vec<(f64, Point2)> = angles
            .into_iter()
            .map(|phi| {
                integral += simpson(integrand, previous, phi, PANELS_PER_SAMPLE);
                previous = phi;
                (phi, Point2::new(r0 * (-k * phi.sin()).exp(), -k * r0 * integral))
            })
            .collect();
        half.reverse();

        // Pin the radii the curve is built to meet.
        if let Some((_, first)) = half.first_mut() {
            first.x = leg;
        }
        if let Some((_, last)) = half.last_mut() {
            last.x = self.r2;
            last.y = 0.0;
        }
        half
    }
}

impl ProfileGenerator for ToroidalFieldCoilPrincetonD {
    fn name(&self) -> &'static str {
        "toroidal_field_coil_princeton_d"
    }

    /// Inner D from the top of its leg round to the bottom, a straight bridge
    /// to the outer leg, the outer D back up, and a straight bridge closing
    /// onto the first point.
    fn find_points(&self) -> Result<Profile> {
        self.validate()?;

        let upper = self.upper_half();
        // Outward normal of the upper half at tangent angle phi.
        let inner_with_normals: Vec<(Point2, Point2)> = upper
            .iter()
            .map(|&(phi, p)| (p, Point2::new(-phi.sin(), phi.cos())))
            .chain(
                upper
                    .iter()
                    .rev()
                    .skip(1)
                    .map(|&(phi, p)| (Point2::new(p.x, -p.y), Point2::new(-phi.sin(), -phi.cos()))),
            )
            .collect();

        let dz = self.vertical_displacement;
        let last = inner_with_normals.len() - 1;
        let inner = inner_with_normals.iter().enumerate().map(|(i, (p, _))| {
            let point = ProfilePoint::spline(p.x, p.y + dz);
            if i == last {
                ProfilePoint::straight(point.r, point.z)
            } else {
                point
            }
        });
        let outer = inner_with_normals.iter().rev().enumerate().map(|(i, (p, n))| {
            let r = p.x + self.thickness * n.x;
            let z = p.y + self.thickness * n.y + dz;
            if i == last {
                ProfilePoint::straight(r, z)
            } else {
                ProfilePoint::spline(r, z)
            }
        });
        let profile: Profile = inner.chain(outer).collect();

        debug!(
            r1 = self.r1,
            r2 = self.r2,
            thickness = self.thickness,
            points = profile.len(),
            "Computed Princeton-D coil outline"
        );
        Ok(profile)
    }

    fn default_operation(&self) -> Operation {
        Operation::Extrude {
            distance: self.distance,
            workplane: Workplane::XZ,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, ProfileError};
    use crate::math::arc_2d::circle_through;
    use crate::profile::{EdgeRun, EdgeType, Orientation};
    use crate::shapes::Shape;
    use approx::assert_relative_eq;

    fn coil() -> ToroidalFieldCoilPrincetonD {
        ToroidalFieldCoilPrincetonD::new(100.0, 300.0, 50.0, 50.0, 2).unwrap()
    }

    #[test]
    fn outline_is_two_spline_runs_joined_by_bridges() {
        let profile = coil().find_points().unwrap();
        let n = ToroidalFieldCoilPrincetonD::DEFAULT_NUM_POINTS;
        assert_eq!(profile.len(), 2 * (2 * n - 1));

        let points = profile.points();
        let half = points.len() / 2;
        assert_eq!(points[half - 1].edge, EdgeType::Straight);
        assert_eq!(points[points.len() - 1].edge, EdgeType::Straight);
        let straight = points.iter().filter(|p| p.edge == EdgeType::Straight).count();
        assert_eq!(straight, 2);

        let runs = profile.edge_runs().unwrap();
        assert_eq!(runs.len(), 4);
        assert!(matches!(runs[0], EdgeRun::Spline { closed: false, .. }));
        assert!(matches!(runs[1], EdgeRun::Line { .. }));
        assert!(matches!(runs[2], EdgeRun::Spline { closed: false, .. }));
        assert!(matches!(runs[3], EdgeRun::Line { .. }));
    }

    #[test]
    fn bridges_span_the_thickness_at_the_leg_ends() {
        let coil = coil();
        let profile = coil.find_points().unwrap();
        let runs = profile.edge_runs().unwrap();
        let [inner_top, inner_bottom, outer_bottom, outer_top] =
            coil.inner_leg_connection_points().unwrap();

        let close = |a: Point2, b: Point2| (a - b).norm() < 1e-9;
        match &runs[1] {
            EdgeRun::Line { start, end } => {
                assert!(close(*start, inner_bottom));
                assert!(close(*end, outer_bottom));
            }
            other => panic!("expected a line, got {other:?}"),
        }
        match &runs[3] {
            EdgeRun::Line { start, end } => {
                assert!(close(*start, outer_top));
                assert!(close(*end, inner_top));
            }
            other => panic!("expected a line, got {other:?}"),
        }
        assert_relative_eq!(inner_top.x, 150.0);
        assert_relative_eq!(outer_top.x, 100.0);
        assert_relative_eq!(inner_top.y, -inner_bottom.y);
        assert!(inner_top.y > 0.0);
    }

    #[test]
    fn inner_d_reaches_r2_at_midplane_and_crowns_at_geometric_mean() {
        let profile = coil().find_points().unwrap();
        let n = ToroidalFieldCoilPrincetonD::DEFAULT_NUM_POINTS;
        let points = profile.points();

        assert_eq!(points[n - 1].r, 300.0);
        assert_eq!(points[n - 1].z, 0.0);

        // Odd sampling puts a sample on the crown, tangent horizontal.
        let crown = points[..n]
            .iter()
            .max_by(|a, b| a.z.total_cmp(&b.z))
            .unwrap();
        assert_relative_eq!(crown.r, (150.0_f64 * 300.0).sqrt(), epsilon = 1e-9);
        assert!(points[..n].iter().all(|p| p.r >= 150.0 - 1e-9 && p.r <= 300.0));
    }

    #[test]
    fn curvature_is_inverse_to_radius() {
        // Constant tension: radius of curvature equals k * r.
        let coil = coil();
        let k = 0.5 * (300.0_f64 / 150.0).ln();
        let upper = coil.upper_half();
        for window in upper.windows(3).step_by(10) {
            let (_, b) = window[1];
            let (_, radius) = circle_through(window[0].1, b, window[2].1).unwrap();
            assert_relative_eq!(radius, k * b.x, max_relative = 1e-2);
        }
    }

    #[test]
    fn outer_d_is_offset_by_thickness() {
        let profile = coil().find_points().unwrap();
        let positions = profile.positions();
        let half = positions.len() / 2;
        for j in 0..half {
            let inner = positions[half - 1 - j];
            let outer = positions[half + j];
            assert_relative_eq!((outer - inner).norm(), 50.0, epsilon = 1e-9);
        }
        let widest = positions[half..]
            .iter()
            .map(|p| p.x)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(widest, 350.0, epsilon = 1e-9);
    }

    #[test]
    fn outline_and_leg_orientation() {
        let coil = coil();
        let profile = coil.find_points().unwrap();
        assert_eq!(profile.orientation(), Orientation::CounterClockwise);
        assert!(profile.validate().is_ok());

        // The leg corners run down the inner side first, so they wind clockwise.
        let leg = coil.inner_leg().unwrap();
        assert_eq!(leg.len(), 4);
        assert_eq!(leg.orientation(), Orientation::Clockwise);
        let height = 2.0 * coil.inner_leg_connection_points().unwrap()[0].y;
        assert_relative_eq!(leg.signed_area(), -50.0 * height, epsilon = 1e-9);
    }

    #[test]
    fn displacement_shifts_every_point() {
        let mut shifted = coil();
        shifted.set_vertical_displacement(-20.0).unwrap();
        let base = coil().find_points().unwrap();
        let moved = shifted.find_points().unwrap();
        for (a, b) in base.iter().zip(&moved) {
            assert_relative_eq!(a.r, b.r);
            assert_relative_eq!(a.z - 20.0, b.z, epsilon = 1e-9);
        }
        let corners = shifted.inner_leg_connection_points().unwrap();
        assert_relative_eq!(corners[0].y + corners[1].y, -40.0, epsilon = 1e-9);
    }

    #[test]
    fn small_machine_builds() {
        let coil = ToroidalFieldCoilPrincetonD::new(0.29, 0.91, 0.05, 0.05, 1).unwrap();
        let profile = coil.find_points().unwrap();
        assert!(profile.validate().is_ok());
        let corners = coil.inner_leg_connection_points().unwrap();
        assert_relative_eq!(corners[0].x, 0.34, epsilon = 1e-12);
        assert_relative_eq!(corners[2].x, 0.29);
    }

    #[test]
    fn leg_must_sit_inside_r2() {
        let mut coil = coil();
        coil.set_r2(150.0).unwrap();
        match coil.find_points().unwrap_err() {
            ProfileError::Geometry(err) => assert_eq!(
                err,
                GeometryError::NotLessThan {
                    lesser: "r1 + thickness",
                    lesser_value: 150.0,
                    greater: "r2",
                    greater_value: 150.0,
                }
            ),
            other => panic!("expected a geometry error, got {other:?}"),
        }
        assert!(coil.inner_leg_connection_points().is_err());
    }

    #[test]
    fn setters_reject_invalid_values() {
        let mut coil = coil();
        assert!(coil.set_thickness(0.0).is_err());
        assert!(coil.set_distance(-1.0).is_err());
        assert!(coil.set_r1(f64::NAN).is_err());
        assert_eq!(
            coil.set_number_of_coils(0),
            Err(ParameterError::TooFewPoints {
                parameter: "number_of_coils",
                value: 0,
                min: 1,
            })
        );
        assert!(coil.set_num_points(2).is_err());
        assert_eq!(coil, self::coil());
    }

    #[test]
    fn coils_are_spaced_evenly() {
        let mut coil = coil();
        coil.set_number_of_coils(8).unwrap();
        let angles = coil.coil_angles();
        assert_eq!(angles.len(), 8);
        assert_relative_eq!(angles[0], 0.0);
        assert_relative_eq!(angles[1], 45.0);
        assert_relative_eq!(angles[7], 315.0);
    }

    #[test]
    fn extrudes_by_distance_on_xz() {
        let mut shape = Shape::new(coil());
        assert_eq!(
            shape.operation(),
            Operation::Extrude {
                distance: 50.0,
                workplane: Workplane::XZ,
            }
        );

        shape.params_mut().set_distance(30.0).unwrap();
        assert_eq!(
            shape.operation(),
            Operation::Extrude {
                distance: 30.0,
                workplane: Workplane::XZ,
            }
        );
        assert_eq!(shape.points().unwrap().len(), 2 * (2 * 101 - 1));
    }
}
