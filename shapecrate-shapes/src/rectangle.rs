//! Screen-covering rectangle

use shapecrate_core::{
    AttributeStream, DrawOperation, DrawingInstructions, FaceWinding, PrimitiveType,
    ShapeGenerator,
};

/// The quad spanning normalized device coordinates `[-1, 1]²` on `z = 0`.
///
/// Drawn as a four-vertex triangle strip without an index stream, which is
/// all a full-screen fragment effect needs. The front faces `+z` with
/// clockwise winding.
#[derive(Debug, Clone)]
pub struct Rectangle {
    positions: AttributeStream,
    normals: AttributeStream,
    tex_coords: AttributeStream,
    instructions: DrawingInstructions,
}

impl Rectangle {
    pub fn new() -> Self {
        let corners = [[-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0], [1.0, 1.0]];

        let mut positions = AttributeStream::with_capacity(3, 4);
        let mut normals = AttributeStream::with_capacity(3, 4);
        let mut tex_coords = AttributeStream::with_capacity(2, 4);
        for [x, y] in corners {
            positions.push([x, y, 0.0]);
            normals.push([0.0, 0.0, 1.0]);
            tex_coords.push([(x + 1.0) / 2.0, (y + 1.0) / 2.0]);
        }

        let instructions =
            std::iter::once(DrawOperation::arrays(PrimitiveType::TriangleStrip, 0, 4)).collect();

        Self {
            positions,
            normals,
            tex_coords,
            instructions,
        }
    }

    /// The 2D corner coordinates, as uploaded for a `vec2` attribute
    pub fn corners_2d(&self) -> AttributeStream {
        let mut stream = AttributeStream::with_capacity(2, 4);
        for p in self.positions.tuples() {
            stream.push([p[0], p[1]]);
        }
        stream
    }
}

impl Default for Rectangle {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeGenerator for Rectangle {
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
        &[]
    }

    fn instructions(&self) -> &DrawingInstructions {
        &self.instructions
    }

    fn face_winding(&self) -> FaceWinding {
        FaceWinding::Clockwise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_is_non_indexed_strip() {
        let rect = Rectangle::new();
        assert!(rect.indices().is_empty());
        assert_eq!(rect.vertex_count(), 4);
        assert!(rect.instructions().validate(0, rect.vertex_count()).is_ok());
        assert_eq!(rect.instructions().slices(rect.indices()).count(), 0);
    }

    #[test]
    fn test_rectangle_winding() {
        let rect = Rectangle::new();
        let mesh = rect.to_mesh().unwrap();
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.agrees_with_normals(FaceWinding::Clockwise));
        assert!(!mesh.agrees_with_normals(FaceWinding::CounterClockwise));
    }

    #[test]
    fn test_corners_2d() {
        let corners = Rectangle::new().corners_2d();
        assert_eq!(corners.as_slice(), &[-1.0, -1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 1.0]);
    }
}
