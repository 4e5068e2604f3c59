//! Prints the profiles of the built-in components with default parameters.
//!
//! Usage:
//! ```text
//! cargo run --example profiles
//! RUST_LOG=toroform=debug cargo run --example profiles
//! ```

use toroform::shapes::{PointsOfInterest, XPoints};
use toroform::{
    AnalyticBoundarySolver, CenterColumnShieldFlatTopHyperbola, Configuration, Plasma,
    PlasmaBoundaries, Profile, Shape, ToroidalFieldCoilPrincetonD,
};

fn main() -> toroform::Result<()> {
    // Default: WARN for everything, INFO for this crate and the demo.
    // Override with RUST_LOG env var (e.g. RUST_LOG=toroform=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("profiles=info".parse().unwrap_or_default())
        .add_directive("toroform=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut shield = Shape::new(CenterColumnShieldFlatTopHyperbola::new(
        100.0, 50.0, 10.0, 30.0, 50.0,
    ));
    print_profile("center column shield", shield.points()?);

    let mut plasma = Plasma::default();
    plasma.set_configuration(Configuration::DoubleNull);
    let x_points = plasma.x_points();
    let landmarks = plasma.points_of_interest();
    let mut plasma = Shape::new(plasma);
    print_profile("plasma (double-null)", plasma.points()?);
    print_landmarks(&landmarks, &x_points);

    let solver = AnalyticBoundarySolver::new(80)?;
    let mut boundaries = Shape::new(PlasmaBoundaries::new(solver));
    print_profile("plasma boundaries (analytic solver)", boundaries.points()?);

    let coil = ToroidalFieldCoilPrincetonD::new(100.0, 300.0, 50.0, 50.0, 12)?;
    let leg = coil.inner_leg()?;
    let angles = coil.coil_angles();
    let mut coil = Shape::new(coil);
    print_profile("toroidal field coil (Princeton-D)", coil.points()?);
    println!("  operation: {:?}", coil.operation());
    println!("  coil angles: {angles:?}");
    print_profile("toroidal field coil inner leg", &leg);

    Ok(())
}

fn print_profile(title: &str, profile: &Profile) {
    println!("{title}: {} points, {:?}", profile.len(), profile.orientation());
    for p in profile {
        println!("  ({:>10.3}, {:>10.3})  {}", p.r, p.z, p.edge);
    }
}

fn print_landmarks(poi: &PointsOfInterest, x_points: &XPoints) {
    println!("  high point:  {:?}", poi.high_point);
    println!("  low point:   {:?}", poi.low_point);
    println!("  outer equatorial point: {:?}", poi.outer_equatorial_point);
    println!("  inner equatorial point: {:?}", poi.inner_equatorial_point);
    println!("  X-points: lower {:?}, upper {:?}", x_points.lower, x_points.upper);
}
