//! 3D transformation utilities

use nalgebra::{Matrix4, Point3, Rotation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D transformation that can be applied to points, normals and meshes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation
    pub fn translation(translation: Vector3<f32>) -> Self {
        Self {
            matrix: Matrix4::new_translation(&translation),
        }
    }

    /// Create a rotation transformation from a quaternion
    pub fn rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self {
            matrix: rotation.to_homogeneous(),
        }
    }

    /// Rotation around the X axis by `angle` radians
    pub fn rotation_x(angle: f32) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(&Vector3::x_axis(), angle).to_homogeneous(),
        }
    }

    /// Rotation around the Y axis by `angle` radians
    pub fn rotation_y(angle: f32) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(&Vector3::y_axis(), angle).to_homogeneous(),
        }
    }

    /// Create a uniform scaling transformation
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            matrix: Matrix4::new_scaling(scale),
        }
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        self.matrix.transform_point(point)
    }

    /// Apply the linear part of the transformation to a vector
    pub fn transform_vector(&self, vector: &Vector3<f32>) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0) * vector
    }

    /// Transform a surface normal, keeping it unit length.
    ///
    /// Uses the inverse transpose of the linear part, falling back to the
    /// linear part itself when that is singular.
    pub fn transform_normal(&self, normal: &Vector3<f32>) -> Vector3<f32> {
        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let m = linear.try_inverse().map(|inv| inv.transpose()).unwrap_or(linear);
        (m * normal).try_normalize(f32::EPSILON).unwrap_or(*normal)
    }

    /// Compose this transformation with another
    pub fn compose(self, other: Self) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Get the inverse transformation
    pub fn inverse(self) -> Option<Self> {
        self.matrix.try_inverse().map(|inv_matrix| Self {
            matrix: inv_matrix,
        })
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform3D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.compose(rhs)
    }
}

impl From<Matrix4<f32>> for Transform3D {
    fn from(matrix: Matrix4<f32>) -> Self {
        Self { matrix }
    }
}
