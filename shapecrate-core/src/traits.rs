//! Core traits for shapecrate

use crate::{
    draw::{DrawingInstructions, FaceWinding, PrimitiveType},
    mesh::TriangleMesh,
    stream::AttributeStream,
    transform::Transform3D,
    vertex::{Point3f, ShapeVertex},
    Result,
};

/// A procedurally generated shape.
///
/// All streams are computed when the generator is constructed, so the
/// accessors are cheap, infallible and return the same data every time.
/// `indices()` and `instructions()` belong together: the instructions
/// reference offsets into exactly that index stream.
pub trait ShapeGenerator {
    /// Vertex positions, 3 values per vertex
    fn positions(&self) -> &AttributeStream;

    /// Unit vertex normals, 3 values per vertex
    fn normals(&self) -> &AttributeStream;

    /// Texture coordinates, 2 values per vertex
    fn tex_coords(&self) -> &AttributeStream;

    /// Element indices into the vertex streams
    fn indices(&self) -> &[u32];

    /// How to split `indices()` into draw calls
    fn instructions(&self) -> &DrawingInstructions;

    /// Winding order of front faces
    fn face_winding(&self) -> FaceWinding;

    /// Number of vertices in each stream
    fn vertex_count(&self) -> usize {
        self.positions().vertex_count()
    }

    /// Interleaved copy of the vertex streams
    fn vertices(&self) -> Vec<ShapeVertex> {
        self.positions()
            .tuples()
            .zip(self.normals().tuples())
            .zip(self.tex_coords().tuples())
            .map(|((p, n), t)| ShapeVertex::new([p[0], p[1], p[2]], [n[0], n[1], n[2]], [t[0], t[1]]))
            .collect()
    }

    /// Submit the shape to `sink` following its drawing instructions
    fn draw<S: DrawSink + ?Sized>(&self, sink: &mut S) -> Result<()>
    where
        Self: Sized,
    {
        self.instructions().draw(self.indices(), sink)
    }

    /// Expand the drawing instructions into an explicit triangle mesh
    fn to_mesh(&self) -> Result<TriangleMesh> {
        TriangleMesh::from_shape(self)
    }
}

/// Receiver of draw submissions, the boundary to a rendering device.
pub trait DrawSink {
    /// Draw `count` consecutive vertices starting at `first`
    fn draw_arrays(&mut self, mode: PrimitiveType, first: u32, count: u32);

    /// Draw the vertices referenced by `indices`
    fn draw_elements(&mut self, mode: PrimitiveType, indices: &[u32]);
}

/// Trait for drawable/renderable objects
pub trait Drawable {
    /// Get the bounding box of the object
    fn bounding_box(&self) -> (Point3f, Point3f);

    /// Get the center point of the object
    fn center(&self) -> Point3f {
        let (min, max) = self.bounding_box();
        nalgebra::center(&min, &max)
    }
}

/// Trait for objects that can be transformed
pub trait Transformable {
    /// Apply a transformation to the object
    fn transform(&mut self, transform: &Transform3D);
}

fn points_bounding_box(mut points: impl Iterator<Item = Point3f>) -> (Point3f, Point3f) {
    let Some(first) = points.next() else {
        return (Point3f::origin(), Point3f::origin());
    };

    points.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)))
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3f, Point3f) {
        points_bounding_box(self.vertices.iter().copied())
    }
}

impl Drawable for AttributeStream {
    /// Bounding box of a position stream; tuples shorter than 3 are padded with zeros
    fn bounding_box(&self) -> (Point3f, Point3f) {
        points_bounding_box(self.tuples().map(|t| {
            let c = |k: usize| t.get(k).copied().unwrap_or(0.0);
            Point3f::new(c(0), c(1), c(2))
        }))
    }
}
