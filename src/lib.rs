pub mod error;
pub mod math;
pub mod profile;
pub mod shapes;
pub mod validate;

pub use error::{ProfileError, Result};
pub use profile::{EdgeType, Profile, ProfilePoint};
pub use shapes::{
    AnalyticBoundarySolver, BoundarySolver, CenterColumnShieldFlatTopHyperbola, Configuration,
    Operation, Plasma, PlasmaBoundaries, ProfileGenerator, Shape, SolverInput,
    ToroidalFieldCoilPrincetonD, Workplane,
};
