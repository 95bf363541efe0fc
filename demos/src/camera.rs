//! Camera and projection matrices for the examples

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use std::f32::consts::TAU;

/// Degrees to radians
pub fn degrees(value: f32) -> f32 {
    value.to_radians()
}

/// Fractions of a full turn to radians
pub fn full_circles(value: f32) -> f32 {
    value * TAU
}

/// Sine of a value measured in full turns, in [-1, 1]
pub fn sine_wave(turns: f32) -> f32 {
    full_circles(turns).sin()
}

/// Right-handed perspective projection with a vertical field of view
pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Matrix4<f32> {
    Perspective3::new(aspect_ratio, fov_y, near, far).into_inner()
}

/// View matrix of a camera at `eye` looking at `target`, Y up
pub fn looking_at(eye: Point3<f32>, target: Point3<f32>) -> Matrix4<f32> {
    Matrix4::look_at_rh(&eye, &target, &Vector3::y())
}

/// A camera on a sphere around a target point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub target: Point3<f32>,
    pub radius: f32,
    /// Angle around the Y axis, radians
    pub azimuth: f32,
    /// Angle above the XZ plane, radians
    pub elevation: f32,
}

impl OrbitCamera {
    pub fn new(target: Point3<f32>, radius: f32, azimuth: f32, elevation: f32) -> Self {
        Self {
            target,
            radius,
            azimuth,
            elevation,
        }
    }

    /// Camera position
    pub fn eye(&self) -> Point3<f32> {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + Vector3::new(cos_el * cos_az, sin_el, cos_el * sin_az) * self.radius
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        looking_at(self.eye(), self.target)
    }
}
