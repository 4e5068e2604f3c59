use tracing::debug;

use crate::error::Result;
use crate::profile::{Profile, ProfilePoint};
use crate::validate::{require_finite, require_less_than};

use super::ProfileGenerator;

/// A center column shield with a flat top and a hyperbolic outer taper.
///
/// The inner face is a cylinder at `inner_radius`. The outer face runs flat at
/// `outer_radius` from the caps at `±height / 2` down to `±arc_height / 2`,
/// then curves in to `mid_radius` at the midplane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterColumnShieldFlatTopHyperbola {
    height: f64,
    arc_height: f64,
    inner_radius: f64,
    mid_radius: f64,
    outer_radius: f64,
}

impl CenterColumnShieldFlatTopHyperbola {
    /// Creates a new shield. Parameter relations are checked when points are generated.
    ///
    /// # Arguments
    ///
    /// * `height` - Total height of the shield
    /// * `arc_height` - Height of the curved part of the outer face
    /// * `inner_radius` - Radius of the cylindrical inner face
    /// * `mid_radius` - Radius of the outer face at the midplane
    /// * `outer_radius` - Radius of the flat parts of the outer face
    #[must_use]
    pub fn new(
        height: f64,
        arc_height: f64,
        inner_radius: f64,
        mid_radius: f64,
        outer_radius: f64,
    ) -> Self {
        Self {
            height,
            arc_height,
            inner_radius,
            mid_radius,
            outer_radius,
        }
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    #[must_use]
    pub fn arc_height(&self) -> f64 {
        self.arc_height
    }

    pub fn set_arc_height(&mut self, arc_height: f64) {
        self.arc_height = arc_height;
    }

    #[must_use]
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn set_inner_radius(&mut self, inner_radius: f64) {
        self.inner_radius = inner_radius;
    }

    #[must_use]
    pub fn mid_radius(&self) -> f64 {
        self.mid_radius
    }

    pub fn set_mid_radius(&mut self, mid_radius: f64) {
        self.mid_radius = mid_radius;
    }

    #[must_use]
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn set_outer_radius(&mut self, outer_radius: f64) {
        self.outer_radius = outer_radius;
    }

    fn validate(&self) -> Result<()> {
        require_finite("height", self.height)?;
        require_finite("arc_height", self.arc_height)?;
        require_finite("inner_radius", self.inner_radius)?;
        require_finite("mid_radius", self.mid_radius)?;
        require_finite("outer_radius", self.outer_radius)?;

        require_less_than(
            "inner_radius",
            self.inner_radius,
            "outer_radius",
            self.outer_radius,
        )?;
        require_less_than(
            "mid_radius",
            self.mid_radius,
            "outer_radius",
            self.outer_radius,
        )?;
        require_less_than("arc_height", self.arc_height, "height", self.height)?;
        Ok(())
    }
}

impl ProfileGenerator for CenterColumnShieldFlatTopHyperbola {
    fn name(&self) -> &'static str {
        "center_column_shield_flat_top_hyperbola"
    }

    fn find_points(&self) -> Result<Profile> {
        self.validate()?;

        let top = self.height / 2.0;
        let arc_top = self.arc_height / 2.0;

        // Closed explicitly: the last point repeats the first.
        let profile = Profile::new(vec![
            ProfilePoint::straight(self.inner_radius, 0.0),
            ProfilePoint::straight(self.inner_radius, top),
            ProfilePoint::straight(self.outer_radius, top),
            ProfilePoint::spline(self.outer_radius, arc_top),
            ProfilePoint::spline(self.mid_radius, 0.0),
            ProfilePoint::straight(self.outer_radius, -arc_top),
            ProfilePoint::straight(self.outer_radius, -top),
            ProfilePoint::straight(self.inner_radius, -top),
            ProfilePoint::straight(self.inner_radius, 0.0),
        ]);

        debug!(
            height = self.height,
            arc_height = self.arc_height,
            "Computed flat-top hyperbola outline"
        );
        Ok(profile)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeometryError, ProfileError};
    use crate::math::Point2;
    use crate::profile::{Closure, EdgeRun, EdgeType};
    use crate::shapes::Shape;

    fn shield() -> CenterColumnShieldFlatTopHyperbola {
        CenterColumnShieldFlatTopHyperbola::new(100.0, 50.0, 10.0, 30.0, 50.0)
    }

    fn geometry_error(shield: &CenterColumnShieldFlatTopHyperbola) -> GeometryError {
        match shield.find_points().unwrap_err() {
            ProfileError::Geometry(err) => err,
            other => panic!("expected a geometry error, got {other:?}"),
        }
    }

    #[test]
    fn reference_outline() {
        let profile = shield().find_points().unwrap();
        let points = profile.points();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], ProfilePoint::new(10.0, 0.0, EdgeType::Straight));
        assert_eq!(points[3], ProfilePoint::new(50.0, 25.0, EdgeType::Spline));
        assert_eq!(points[4], ProfilePoint::new(30.0, 0.0, EdgeType::Spline));
        assert_eq!(points[5], ProfilePoint::new(50.0, -25.0, EdgeType::Straight));
    }

    #[test]
    fn first_and_last_points_match() {
        let profile = shield().find_points().unwrap();
        assert_eq!(profile.first(), profile.last());
        assert_eq!(profile.closure(), Closure::Explicit);
    }

    #[test]
    fn outline_is_symmetric_about_midplane() {
        for shield in [
            shield(),
            CenterColumnShieldFlatTopHyperbola::new(640.0, 410.0, 3.5, 70.25, 121.0),
            CenterColumnShieldFlatTopHyperbola::new(7.0, 0.5, -2.0, -1.0, 0.0),
        ] {
            let profile = shield.find_points().unwrap();
            let points = profile.points();
            let n = points.len();
            for i in 0..n {
                let mirror = points[n - 1 - i];
                assert_eq!(points[i].r, mirror.r);
                assert_eq!(points[i].z, -mirror.z);
            }
        }
    }

    #[test]
    fn taper_is_one_spline_through_the_bulge() {
        let runs = shield().find_points().unwrap().edge_runs().unwrap();
        let splines: Vec<_> = runs
            .iter()
            .filter(|run| matches!(run, EdgeRun::Spline { .. }))
            .collect();
        assert_eq!(splines.len(), 1);
        assert_eq!(
            splines[0],
            &EdgeRun::Spline {
                points: vec![
                    Point2::new(50.0, 25.0),
                    Point2::new(30.0, 0.0),
                    Point2::new(50.0, -25.0)
                ],
                closed: false,
            }
        );
        assert_eq!(runs.len(), 7);
    }

    #[test]
    fn inner_radius_must_be_below_outer_radius() {
        let mut shield = shield();
        shield.set_inner_radius(50.0);
        assert_eq!(
            geometry_error(&shield),
            GeometryError::NotLessThan {
                lesser: "inner_radius",
                lesser_value: 50.0,
                greater: "outer_radius",
                greater_value: 50.0,
            }
        );
    }

    #[test]
    fn mid_radius_must_be_below_outer_radius() {
        let mut shield = shield();
        shield.set_mid_radius(55.0);
        let err = geometry_error(&shield);
        assert_eq!(err.to_string(), "mid_radius (55) is larger than outer_radius (50)");
    }

    #[test]
    fn arc_height_must_be_below_height() {
        let mut shield = shield();
        shield.set_arc_height(100.0);
        let err = geometry_error(&shield);
        assert_eq!(err.to_string(), "arc_height (100) is larger than height (100)");
    }

    #[test]
    fn non_finite_parameter_is_rejected() {
        let mut shield = shield();
        shield.set_height(f64::NAN);
        assert!(matches!(
            shield.find_points().unwrap_err(),
            ProfileError::Parameter(_)
        ));
    }

    #[test]
    fn parameter_change_reaches_next_read() {
        let mut shape = Shape::new(shield());
        assert_eq!(shape.points().unwrap().points()[1].z, 50.0);

        shape.params_mut().set_height(300.0);
        assert_eq!(shape.points().unwrap().points()[1].z, 150.0);

        shape.params_mut().set_outer_radius(80.0);
        let profile = shape.points().unwrap();
        assert_eq!(profile.points()[2].r, 80.0);
        assert_eq!(profile.points()[3], ProfilePoint::spline(80.0, 25.0));
    }
}
