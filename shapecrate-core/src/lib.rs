//! Core data structures and traits for shapecrate
//! 
//! This crate provides the fundamental types shared by the shape generators:
//! vertex attribute streams, drawing instructions, triangle meshes and the
//! traits that connect a generated shape to whatever renders it.

pub mod vertex;
pub mod stream;
pub mod draw;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod config;
pub mod error;

pub use vertex::*;
pub use stream::*;
pub use draw::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use config::BuildConfig;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4, UnitQuaternion};
