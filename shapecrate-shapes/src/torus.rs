//! Torus tessellation
//!
//! The torus is parametrized by a (ring, segment) lattice. Ring `i` selects
//! the angle around the tube's circular cross-section, segment `j` the angle
//! around the central Y axis. Both axes are periodic, so the index stream
//! wraps around in both directions and there are no pole special cases.

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use shapecrate_core::{
    AttributeStream, DrawOperation, DrawingInstructions, Error, FaceWinding, PrimitiveType,
    Result, ShapeGenerator,
};
use std::f64::consts::TAU;
use tracing::debug;

/// How the torus index stream is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorusTopology {
    /// Two triangles per lattice quad, drawn with a single call
    #[default]
    Triangles,
    /// One triangle strip per ring band, one draw call each
    Strips,
}

/// Dimensions and resolution of a torus
///
/// Any positive radii are accepted. Outward-facing counter-clockwise
/// triangles are only guaranteed when `minor_radius < major_radius`; a
/// spindle torus self-intersects and its inner faces wind the other way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TorusParams {
    /// Distance from the center to the middle of the tube
    pub major_radius: f64,
    /// Radius of the tube
    pub minor_radius: f64,
    /// Subdivisions around the tube cross-section
    pub rings: usize,
    /// Subdivisions around the central axis
    pub segments: usize,
    pub topology: TorusTopology,
}

impl Default for TorusParams {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            minor_radius: 0.5,
            rings: 18,
            segments: 36,
            topology: TorusTopology::Triangles,
        }
    }
}

impl TorusParams {
    /// Smallest resolution that yields a non-degenerate lattice
    pub const MIN_RESOLUTION: usize = 3;

    pub fn new(major_radius: f64, minor_radius: f64, rings: usize, segments: usize) -> Self {
        Self {
            major_radius,
            minor_radius,
            rings,
            segments,
            topology: TorusTopology::default(),
        }
    }

    pub fn with_topology(mut self, topology: TorusTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Check the parameters without generating anything
    pub fn validate(&self) -> Result<()> {
        check_radius("major_radius", self.major_radius)?;
        check_radius("minor_radius", self.minor_radius)?;
        check_resolution("rings", self.rings)?;
        check_resolution("segments", self.segments)?;

        // six indices per quad must stay addressable with 32-bit offsets
        let fits = self
            .rings
            .checked_mul(self.segments)
            .and_then(|quads| quads.checked_mul(6))
            .is_some_and(|n| n <= u32::MAX as usize);
        if !fits {
            return Err(Error::invalid_parameter(
                "rings * segments",
                format!("{} x {} exceeds 32-bit indexing", self.rings, self.segments),
            ));
        }
        Ok(())
    }

    /// Number of vertices the torus will have
    pub fn vertex_count(&self) -> usize {
        self.rings * self.segments
    }

    /// Number of indices the torus will have
    pub fn index_count(&self) -> usize {
        match self.topology {
            TorusTopology::Triangles => 6 * self.rings * self.segments,
            TorusTopology::Strips => 2 * self.rings * (self.segments + 1),
        }
    }
}

fn check_radius(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(name, format!("must be positive and finite, got {value}")))
    }
}

fn check_resolution(name: &str, value: usize) -> Result<()> {
    if value >= TorusParams::MIN_RESOLUTION {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            format!("must be at least {}, got {value}", TorusParams::MIN_RESOLUTION),
        ))
    }
}

/// A tessellated torus centered at the origin, with the Y axis as its axis
/// of revolution.
///
/// Front faces wind counter-clockwise seen from outside, which holds for
/// ring tori (`minor_radius < major_radius`) only.
#[derive(Debug, Clone)]
pub struct Torus {
    params: TorusParams,
    positions: AttributeStream,
    normals: AttributeStream,
    tex_coords: AttributeStream,
    indices: Vec<u32>,
    instructions: DrawingInstructions,
}

impl Torus {
    /// Tessellate a torus with a triangle-list index layout
    pub fn new(major_radius: f64, minor_radius: f64, rings: usize, segments: usize) -> Result<Self> {
        Self::from_params(TorusParams::new(major_radius, minor_radius, rings, segments))
    }

    /// Tessellate a torus described by `params`
    pub fn from_params(params: TorusParams) -> Result<Self> {
        params.validate()?;

        let (positions, normals, tex_coords) = lattice_streams(&params);
        let (indices, instructions) = match params.topology {
            TorusTopology::Triangles => triangle_list(params.rings, params.segments),
            TorusTopology::Strips => ring_strips(params.rings, params.segments),
        };

        debug!(
            major_radius = params.major_radius,
            minor_radius = params.minor_radius,
            rings = params.rings,
            segments = params.segments,
            topology = ?params.topology,
            vertices = positions.vertex_count(),
            indices = indices.len(),
            draw_calls = instructions.len(),
            "tessellated torus"
        );

        Ok(Self {
            params,
            positions,
            normals,
            tex_coords,
            indices,
            instructions,
        })
    }

    pub fn params(&self) -> &TorusParams {
        &self.params
    }

    /// Index of the lattice vertex at (`ring`, `segment`), both wrapping around
    pub fn vertex_index(&self, ring: usize, segment: usize) -> u32 {
        lattice_index(self.params.rings, self.params.segments, ring, segment)
    }
}

impl ShapeGenerator for Torus {
    fn positions(&self) -> &AttributeStream {
        &self.positions
    }

    fn normals(&self) -> &AttributeStream {
        &self.normals
    }

    fn tex_coords(&self) -> &AttributeStream {
        &self.tex_coords
    }

    fn indices(&self) -> &[u32] {
        &self.indices
    }

    fn instructions(&self) -> &DrawingInstructions {
        &self.instructions
    }

    fn face_winding(&self) -> FaceWinding {
        FaceWinding::CounterClockwise
    }
}

fn lattice_index(rings: usize, segments: usize, ring: usize, segment: usize) -> u32 {
    ((ring % rings) * segments + segment % segments) as u32
}

fn lattice_streams(params: &TorusParams) -> (AttributeStream, AttributeStream, AttributeStream) {
    let (rings, segments) = (params.rings, params.segments);
    let (major, minor) = (params.major_radius, params.minor_radius);

    let vertex_count = rings * segments;
    let mut positions = AttributeStream::with_capacity(3, vertex_count);
    let mut normals = AttributeStream::with_capacity(3, vertex_count);
    let mut tex_coords = AttributeStream::with_capacity(2, vertex_count);

    for (i, j) in iproduct!(0..rings, 0..segments) {
        let s = j as f64 / segments as f64;
        let t = i as f64 / rings as f64;
        let (sin_tube, cos_tube) = (TAU * t).sin_cos();
        let (sin_axis, cos_axis) = (TAU * s).sin_cos();

        let ring_radius = major + minor * cos_tube;
        positions.push([
            (ring_radius * cos_axis) as f32,
            (minor * sin_tube) as f32,
            (ring_radius * sin_axis) as f32,
        ]);
        normals.push([
            (cos_tube * cos_axis) as f32,
            sin_tube as f32,
            (cos_tube * sin_axis) as f32,
        ]);
        tex_coords.push([s as f32, t as f32]);
    }

    (positions, normals, tex_coords)
}

fn triangle_list(rings: usize, segments: usize) -> (Vec<u32>, DrawingInstructions) {
    let at = |i, j| lattice_index(rings, segments, i, j);

    let mut indices = Vec::with_capacity(6 * rings * segments);
    for (i, j) in iproduct!(0..rings, 0..segments) {
        indices.extend_from_slice(&[
            at(i, j),
            at(i + 1, j),
            at(i, j + 1),
            at(i, j + 1),
            at(i + 1, j),
            at(i + 1, j + 1),
        ]);
    }

    let instructions = std::iter::once(DrawOperation::elements(
        PrimitiveType::Triangles,
        0,
        indices.len() as u32,
    ))
    .collect();
    (indices, instructions)
}

fn ring_strips(rings: usize, segments: usize) -> (Vec<u32>, DrawingInstructions) {
    let at = |i, j| lattice_index(rings, segments, i, j);
    let strip_len = 2 * (segments + 1);

    let mut indices = Vec::with_capacity(rings * strip_len);
    let mut instructions = DrawingInstructions::new();
    for i in 0..rings {
        let first = indices.len() as u32;
        for j in 0..=segments {
            indices.push(at(i, j));
            indices.push(at(i + 1, j));
        }
        instructions.push(DrawOperation::elements(
            PrimitiveType::TriangleStrip,
            first,
            strip_len as u32,
        ));
    }
    (indices, instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_torus() {
        let torus = Torus::new(1.0, 0.5, 18, 36).unwrap();

        assert_eq!(torus.positions().vertex_count(), 648);
        assert_eq!(torus.normals().vertex_count(), 648);
        assert_eq!(torus.tex_coords().vertex_count(), 648);
        assert_eq!(torus.positions().get(0), Some(&[1.5, 0.0, 0.0][..]));
        assert_eq!(torus.indices().len(), 3888);
        assert_eq!(torus.face_winding(), FaceWinding::CounterClockwise);
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let cases = [
            TorusParams::new(1.0, 0.5, 2, 36),
            TorusParams::new(1.0, 0.5, 18, 2),
            TorusParams::new(0.0, 0.5, 18, 36),
            TorusParams::new(1.0, -0.5, 18, 36),
            TorusParams::new(f64::NAN, 0.5, 18, 36),
            TorusParams::new(1.0, f64::INFINITY, 18, 36),
            TorusParams::new(1.0, 0.5, usize::MAX / 2, 36),
        ];
        for params in cases {
            let result = Torus::from_params(params);
            assert!(
                matches!(result, Err(Error::InvalidParameter(_))),
                "{params:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_outward_winding_needs_ring_torus() {
        let ring = Torus::new(1.0, 0.5, 18, 36).unwrap().to_mesh().unwrap();
        assert!(ring.agrees_with_normals(FaceWinding::CounterClockwise));

        // accepted, but the inner region winds against its normals
        let spindle = Torus::new(0.3, 1.0, 18, 36).unwrap().to_mesh().unwrap();
        assert!(!spindle.agrees_with_normals(FaceWinding::CounterClockwise));
    }

    #[test]
    fn test_lattice_layout_is_ring_major() {
        let torus = Torus::new(2.0, 0.5, 4, 8).unwrap();

        // ring 1 is a quarter turn around the tube: top of the tube
        let p = torus.positions().get(torus.vertex_index(1, 0) as usize).unwrap();
        assert_relative_eq!(p[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(p[1], 0.5, epsilon = 1e-6);
        assert_relative_eq!(p[2], 0.0, epsilon = 1e-6);

        // segment 2 is a quarter turn around the axis
        let p = torus.positions().get(torus.vertex_index(0, 2) as usize).unwrap();
        assert_relative_eq!(p[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(p[2], 2.5, epsilon = 1e-6);

        assert_eq!(torus.vertex_index(4, 8), 0);
        assert_eq!(torus.vertex_index(5, 9), torus.vertex_index(1, 1));
    }

    #[test]
    fn test_normals_independent_of_major_radius() {
        let thin = Torus::new(1.0, 0.25, 6, 9).unwrap();
        let wide = Torus::new(5.0, 0.25, 6, 9).unwrap();
        assert_eq!(thin.normals(), wide.normals());
        assert_ne!(thin.positions(), wide.positions());
    }

    #[test]
    fn test_tex_coords_follow_lattice() {
        let torus = Torus::new(1.0, 0.5, 4, 5).unwrap();
        let t = torus.tex_coords().get(torus.vertex_index(3, 2) as usize).unwrap();
        assert_relative_eq!(t[0], 0.4);
        assert_relative_eq!(t[1], 0.75);
    }

    #[test]
    fn test_strip_topology() {
        let params = TorusParams::new(1.0, 0.5, 5, 7).with_topology(TorusTopology::Strips);
        let torus = Torus::from_params(params).unwrap();

        assert_eq!(torus.indices().len(), params.index_count());
        assert_eq!(torus.instructions().len(), 5);
        for (n, op) in torus.instructions().operations().iter().enumerate() {
            assert_eq!(op.mode, PrimitiveType::TriangleStrip);
            assert_eq!(op.first as usize, n * 16);
            assert_eq!(op.count, 16);
        }
    }

    #[test]
    fn test_params_deserialize_with_defaults() {
        let params: TorusParams =
            serde_json::from_str(r#"{ "rings": 6, "topology": "strips" }"#).unwrap();
        assert_eq!(params.rings, 6);
        assert_eq!(params.segments, 36);
        assert_eq!(params.major_radius, 1.0);
        assert_eq!(params.topology, TorusTopology::Strips);
    }
}
