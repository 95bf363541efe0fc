//! Triangle mesh data structures and functionality

use crate::{
    draw::{DrawMethod, FaceWinding, PrimitiveType},
    traits::{ShapeGenerator, Transformable},
    transform::Transform3D,
    vertex::{Point3f, TexCoord, Vector3f},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A triangle mesh with vertices and faces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[u32; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub tex_coords: Option<Vec<TexCoord>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            tex_coords: None,
        }
    }

    /// Expand a shape's drawing instructions into explicit triangles.
    ///
    /// Triangle lists, strips and fans are supported; strips keep the
    /// winding of their first triangle. Point and line primitives are
    /// skipped, as are degenerate triangles.
    pub fn from_shape<S: ShapeGenerator + ?Sized>(shape: &S) -> Result<Self> {
        let vertex_count = shape.vertex_count();
        let indices = shape.indices();
        shape.instructions().validate(indices.len(), vertex_count)?;

        let mut faces = Vec::new();
        for op in shape.instructions() {
            if !op.mode.is_triangles() {
                continue;
            }
            match op.method {
                DrawMethod::DrawElements => {
                    let start = op.first as usize;
                    triangulate(op.mode, &indices[start..start + op.count as usize], &mut faces);
                }
                DrawMethod::DrawArrays => {
                    let implicit: Vec<u32> = (op.first..op.first + op.count).collect();
                    triangulate(op.mode, &implicit, &mut faces);
                }
            }
        }

        if let Some(bad) = faces.iter().flatten().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidData(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }

        let vertices = shape
            .positions()
            .tuples()
            .map(|p| Point3f::new(p[0], p[1], p[2]))
            .collect();
        let normals = shape
            .normals()
            .tuples()
            .map(|n| Vector3f::new(n[0], n[1], n[2]))
            .collect();
        let tex_coords = shape.tex_coords().tuples().map(|t| [t[0], t[1]]).collect();

        Ok(Self {
            vertices,
            faces,
            normals: Some(normals),
            tex_coords: Some(tex_coords),
        })
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [u32; 3]) {
        self.faces.push(face);
    }

    /// Non-normalized face normals, following the counter-clockwise rule
    pub fn face_cross_products(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|&[a, b, c]| {
                let v0 = self.vertices[a as usize];
                let v1 = self.vertices[b as usize];
                let v2 = self.vertices[c as usize];
                (v1 - v0).cross(&(v2 - v0))
            })
            .collect()
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.face_cross_products()
            .into_iter()
            .map(|n| n.try_normalize(f32::EPSILON).unwrap_or_else(Vector3f::zeros))
            .collect()
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set vertex texture coordinates
    pub fn set_tex_coords(&mut self, tex_coords: Vec<TexCoord>) {
        if tex_coords.len() == self.vertices.len() {
            self.tex_coords = Some(tex_coords);
        }
    }

    /// Number of distinct undirected edges
    pub fn edge_count(&self) -> usize {
        let mut edges: Vec<(u32, u32)> = self
            .faces
            .iter()
            .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges.len()
    }

    /// V - E + F; zero for a closed torus, two for a closed sphere
    pub fn euler_characteristic(&self) -> i64 {
        self.vertex_count() as i64 - self.edge_count() as i64 + self.face_count() as i64
    }

    /// Whether every edge is shared by exactly two faces traversing it in
    /// opposite directions, i.e. the surface is closed and consistently wound.
    pub fn is_closed_and_oriented(&self) -> bool {
        let mut directed: HashMap<(u32, u32), u32> = HashMap::new();
        for &[a, b, c] in &self.faces {
            for edge in [(a, b), (b, c), (c, a)] {
                *directed.entry(edge).or_insert(0) += 1;
            }
        }
        !directed.is_empty()
            && directed
                .iter()
                .all(|(&(a, b), &n)| n == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Whether, under `winding`, every face's front side is the side its
    /// vertex normals point to. False when the mesh has no normals.
    pub fn agrees_with_normals(&self, winding: FaceWinding) -> bool {
        let Some(normals) = &self.normals else {
            return false;
        };
        let sign = match winding {
            FaceWinding::CounterClockwise => 1.0,
            FaceWinding::Clockwise => -1.0,
        };
        self.faces
            .iter()
            .zip(self.face_cross_products())
            .all(|(face, cross)| {
                let normal: Vector3f = face.iter().map(|&i| normals[i as usize]).sum();
                sign * cross.dot(&normal) > 0.0
            })
    }

    /// Reverse the winding of every face
    pub fn flip_faces(&mut self) {
        for face in &mut self.faces {
            face.swap(1, 2);
        }
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
        self.tex_coords = None;
    }
}

impl Transformable for TriangleMesh {
    fn transform(&mut self, transform: &Transform3D) {
        for vertex in &mut self.vertices {
            *vertex = transform.transform_point(vertex);
        }
        if let Some(normals) = &mut self.normals {
            for normal in normals {
                *normal = transform.transform_normal(normal);
            }
        }
    }
}

/// Append the triangles described by one primitive to `out`
pub fn triangulate(mode: PrimitiveType, indices: &[u32], out: &mut Vec<[u32; 3]>) {
    let mut emit = |tri: [u32; 3]| {
        if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
            out.push(tri);
        }
    };

    match mode {
        PrimitiveType::Triangles => {
            for tri in indices.chunks_exact(3) {
                emit([tri[0], tri[1], tri[2]]);
            }
        }
        PrimitiveType::TriangleStrip => {
            for (k, w) in indices.windows(3).enumerate() {
                if k % 2 == 0 {
                    emit([w[0], w[1], w[2]]);
                } else {
                    emit([w[1], w[0], w[2]]);
                }
            }
        }
        PrimitiveType::TriangleFan => {
            if let Some((&center, rest)) = indices.split_first() {
                for w in rest.windows(2) {
                    emit([center, w[0], w[1]]);
                }
            }
        }
        PrimitiveType::Points
        | PrimitiveType::Lines
        | PrimitiveType::LineStrip
        | PrimitiveType::LineLoop => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> TriangleMesh {
        let vertices = vec![
            Point3f::new(0.0, 0.0, 0.0),
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 1.0, 0.0),
            Point3f::new(0.0, 0.0, 1.0),
        ];
        let faces = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        TriangleMesh::from_vertices_and_faces(vertices, faces)
    }

    #[test]
    fn test_triangulate_strip_alternates_winding() {
        let mut out = Vec::new();
        triangulate(PrimitiveType::TriangleStrip, &[0, 1, 2, 3, 4], &mut out);
        assert_eq!(out, vec![[0, 1, 2], [2, 1, 3], [2, 3, 4]]);
    }

    #[test]
    fn test_triangulate_fan_and_list() {
        let mut out = Vec::new();
        triangulate(PrimitiveType::TriangleFan, &[0, 1, 2, 3], &mut out);
        assert_eq!(out, vec![[0, 1, 2], [0, 2, 3]]);

        out.clear();
        triangulate(PrimitiveType::Triangles, &[0, 1, 2, 3, 4], &mut out);
        assert_eq!(out, vec![[0, 1, 2]]);

        out.clear();
        triangulate(PrimitiveType::Lines, &[0, 1, 2, 3], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_triangulate_skips_degenerate() {
        let mut out = Vec::new();
        triangulate(PrimitiveType::TriangleStrip, &[0, 1, 1, 2], &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_closed_tetrahedron() {
        let mesh = tetrahedron();
        assert!(mesh.is_closed_and_oriented());
        assert_eq!(mesh.edge_count(), 6);
        assert_eq!(mesh.euler_characteristic(), 2);

        let mut open = mesh.clone();
        open.faces.pop();
        assert!(!open.is_closed_and_oriented());
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = tetrahedron();
        let normals = mesh.calculate_face_normals();
        assert_relative_eq!(normals[0], -Vector3f::z(), epsilon = 1e-6);
        assert_relative_eq!(normals[1], -Vector3f::y(), epsilon = 1e-6);

        let mut flipped = mesh.clone();
        flipped.flip_faces();
        assert_relative_eq!(flipped.calculate_face_normals()[0], Vector3f::z(), epsilon = 1e-6);
        assert!(flipped.is_closed_and_oriented());
    }

    #[test]
    fn test_transform_mesh() {
        let mut mesh = tetrahedron();
        mesh.set_normals(vec![Vector3f::x(); 4]);
        mesh.transform(&Transform3D::translation(Vector3f::new(0.0, 0.0, 2.0)));

        assert_eq!(mesh.vertices[0], Point3f::new(0.0, 0.0, 2.0));
        assert_eq!(mesh.normals.as_ref().unwrap()[0], Vector3f::x());
    }

    #[test]
    fn test_set_normals_rejects_wrong_length() {
        let mut mesh = tetrahedron();
        mesh.set_normals(vec![Vector3f::x(); 3]);
        assert!(mesh.normals.is_none());
    }
}
