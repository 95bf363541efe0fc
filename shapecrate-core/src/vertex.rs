//! Vertex types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use bytemuck::{Pod, Zeroable};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D texture coordinate
pub type TexCoord = [f32; 2];

/// Interleaved vertex with position, normal and texture coordinate.
///
/// The layout is `#[repr(C)]` and `Pod`, so a slice of these can be handed
/// to a device buffer upload as raw bytes via [`bytemuck::cast_slice`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl ShapeVertex {
    /// Number of `f32` values in one vertex
    pub const FLOATS: usize = 8;

    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// Position as a nalgebra point
    pub fn point(&self) -> Point3f {
        Point3f::from(self.position)
    }

    /// Normal as a nalgebra vector
    pub fn normal_vector(&self) -> Vector3f {
        Vector3f::from(self.normal)
    }
}

impl Default for ShapeVertex {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_vertex_layout() {
        assert_eq!(std::mem::size_of::<ShapeVertex>(), ShapeVertex::FLOATS * 4);

        let vertices = [ShapeVertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.25, 0.5])];
        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.0, 1.0, 0.0, 0.25, 0.5]);
    }

    #[test]
    fn test_shape_vertex_accessors() {
        let v = ShapeVertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]);
        assert_eq!(v.point(), Point3f::new(1.0, 0.0, 0.0));
        assert_eq!(v.normal_vector(), Vector3f::z());
    }
}
