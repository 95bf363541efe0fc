//! Axis-aligned cube with flat-shaded faces

use shapecrate_core::{
    AttributeStream, DrawOperation, DrawingInstructions, Error, FaceWinding, PrimitiveType,
    Result, ShapeGenerator,
};
use tracing::debug;

/// Outward normal, then two edge directions whose cross product is the normal
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Corner offsets along the two edge directions, with their texture coordinates
const CORNERS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

/// A cube centered at the origin.
///
/// Each face has its own four vertices so that normals and texture
/// coordinates stay per-face; 24 vertices and 36 indices in total.
#[derive(Debug, Clone)]
pub struct Cube {
    side: f32,
    positions: AttributeStream,
    normals: AttributeStream,
    tex_coords: AttributeStream,
    indices: Vec<u32>,
    instructions: DrawingInstructions,
}

impl Cube {
    /// A cube with unit side length
    pub fn new() -> Self {
        Self::build(1.0)
    }

    /// A cube with the given side length
    pub fn with_side(side: f32) -> Result<Self> {
        if !(side.is_finite() && side > 0.0) {
            return Err(Error::invalid_parameter(
                "side",
                format!("must be positive and finite, got {side}"),
            ));
        }
        Ok(Self::build(side))
    }

    pub fn side(&self) -> f32 {
        self.side
    }

    fn build(side: f32) -> Self {
        let half = side / 2.0;
        let mut positions = AttributeStream::with_capacity(3, 24);
        let mut normals = AttributeStream::with_capacity(3, 24);
        let mut tex_coords = AttributeStream::with_capacity(2, 24);
        let mut indices = Vec::with_capacity(36);

        for (face, (n, u, v)) in FACES.iter().enumerate() {
            for &(s, t) in &CORNERS {
                let (a, b) = (2.0 * s - 1.0, 2.0 * t - 1.0);
                positions.push([
                    half * (n[0] + a * u[0] + b * v[0]),
                    half * (n[1] + a * u[1] + b * v[1]),
                    half * (n[2] + a * u[2] + b * v[2]),
                ]);
                normals.push(*n);
                tex_coords.push([s, t]);
            }
            let base = 4 * face as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        let instructions = std::iter::once(DrawOperation::elements(
            PrimitiveType::Triangles,
            0,
            indices.len() as u32,
        ))
        .collect();

        debug!(side, "built cube");
        Self {
            side,
            positions,
            normals,
            tex_coords,
            indices,
            instructions,
        }
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeGenerator for Cube {
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
