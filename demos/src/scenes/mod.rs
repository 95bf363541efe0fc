//! Example scenes

mod cube;
mod newton;
mod torus;

pub use cube::CubeExample;
pub use newton::{newton_color, newton_iterations, NewtonExample, NEWTON_MAX_ITERATIONS};
pub use torus::TorusExample;
