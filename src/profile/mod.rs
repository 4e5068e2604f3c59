mod outline;
mod point;

pub use outline::{Closure, EdgeRun, Orientation, Profile};
pub use point::{EdgeType, ProfilePoint};
