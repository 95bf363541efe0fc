//! Procedural shape generators
//!
//! Every generator computes its vertex streams, index stream and drawing
//! instructions once, at construction, and exposes them through
//! [`ShapeGenerator`](shapecrate_core::ShapeGenerator).

pub mod torus;
pub mod cube;
pub mod rectangle;

pub use torus::{Torus, TorusParams, TorusTopology};
pub use cube::Cube;
pub use rectangle::Rectangle;
