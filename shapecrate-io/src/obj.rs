//! OBJ format support

use crate::{MeshReader, MeshWriter, ShapeWriter};
use shapecrate_core::{Error, Point3f, Result, ShapeGenerator, TriangleMesh, Vector3f};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

pub struct ObjReader;
pub struct ObjWriter;

impl ObjWriter {
    /// Write `mesh` as OBJ text to `writer`.
    ///
    /// Texture coordinates and normals are emitted per vertex, so every face
    /// corner uses the same index for all three attributes.
    pub fn write_mesh_to<W: Write>(mesh: &TriangleMesh, mut writer: W) -> Result<()> {
        writeln!(writer, "# shapecrate OBJ export")?;
        writeln!(writer, "# vertices: {}, faces: {}", mesh.vertex_count(), mesh.face_count())?;

        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }
        let tex_coords = mesh.tex_coords.as_deref().filter(|t| t.len() == mesh.vertex_count());
        for t in tex_coords.unwrap_or_default() {
            writeln!(writer, "vt {} {}", t[0], t[1])?;
        }
        let normals = mesh.normals.as_deref().filter(|n| n.len() == mesh.vertex_count());
        for n in normals.unwrap_or_default() {
            writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
        }

        for face in &mesh.faces {
            write!(writer, "f")?;
            for &i in face {
                let i = i + 1;
                match (tex_coords.is_some(), normals.is_some()) {
                    (true, true) => write!(writer, " {i}/{i}/{i}")?,
                    (true, false) => write!(writer, " {i}/{i}")?,
                    (false, true) => write!(writer, " {i}//{i}")?,
                    (false, false) => write!(writer, " {i}")?,
                }
            }
            writeln!(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        Self::write_mesh_to(mesh, BufWriter::new(file))?;
        debug!(path = %path.as_ref().display(), faces = mesh.face_count(), "wrote OBJ mesh");
        Ok(())
    }
}

impl ShapeWriter for ObjWriter {
    fn write_shape<S: ShapeGenerator, P: AsRef<Path>>(shape: &S, path: P) -> Result<()> {
        Self::write_mesh(&shape.to_mesh()?, path)
    }
}

impl ObjReader {
    /// Parse OBJ text. Polygons are fan-triangulated; only the position
    /// index of each face corner is used.
    pub fn read_mesh_from<R: BufRead>(reader: R) -> Result<TriangleMesh> {
        let mut mesh = TriangleMesh::new();
        let mut normals = Vec::new();
        let mut tex_coords = Vec::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let mut tokens = line.split_whitespace();
            let parse_err = |what: &str| {
                Error::InvalidData(format!("OBJ line {}: invalid {what}: {line}", line_no + 1))
            };

            match tokens.next() {
                Some("v") => {
                    let [x, y, z] = parse_floats::<3>(&mut tokens).ok_or_else(|| parse_err("vertex"))?;
                    mesh.add_vertex(Point3f::new(x, y, z));
                }
                Some("vn") => {
                    let [x, y, z] = parse_floats::<3>(&mut tokens).ok_or_else(|| parse_err("normal"))?;
                    normals.push(Vector3f::new(x, y, z));
                }
                Some("vt") => {
                    let [s, t] = parse_floats::<2>(&mut tokens).ok_or_else(|| parse_err("texture coordinate"))?;
                    tex_coords.push([s, t]);
                }
                Some("f") => {
                    let corners = tokens
                        .map(|corner| resolve_index(corner, mesh.vertex_count()))
                        .collect::<Option<Vec<u32>>>()
                        .filter(|c| c.len() >= 3)
                        .ok_or_else(|| parse_err("face"))?;
                    for k in 1..corners.len() - 1 {
                        mesh.add_face([corners[0], corners[k], corners[k + 1]]);
                    }
                }
                _ => {}
            }
        }

        mesh.set_normals(normals);
        mesh.set_tex_coords(tex_coords);
        Ok(mesh)
    }
}

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path.as_ref())?;
        Self::read_mesh_from(BufReader::new(file))
    }
}

fn parse_floats<const N: usize>(tokens: &mut std::str::SplitWhitespace<'_>) -> Option<[f32; N]> {
    let mut out = [0.0; N];
    for value in &mut out {
        *value = tokens.next()?.parse().ok()?;
    }
    Some(out)
}

/// Zero-based position index of a face corner like `7`, `7/2` or `-1//3`
fn resolve_index(corner: &str, vertex_count: usize) -> Option<u32> {
    let raw: i64 = corner.split('/').next()?.parse().ok()?;
    let index = match raw {
        0 => return None,
        r if r > 0 => r - 1,
        r => vertex_count as i64 + r,
    };
    (0..vertex_count as i64).contains(&index).then_some(index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecrate_shapes::{Cube, Torus};

    #[test]
    fn test_write_torus_records() {
        let torus = Torus::new(1.0, 0.5, 3, 4).unwrap();
        let mut out = Vec::new();
        ObjWriter::write_mesh_to(&torus.to_mesh().unwrap(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), 12);
        assert_eq!(count("vt "), 12);
        assert_eq!(count("vn "), 12);
        assert_eq!(count("f "), 24);
        assert!(text.contains("\nv 1.5 0 0\n"));
        assert!(text.contains("\nf 1/1/1 5/5/5 2/2/2\n"));
    }

    #[test]
    fn test_read_back_cube() {
        let mesh = Cube::new().to_mesh().unwrap();
        let mut out = Vec::new();
        ObjWriter::write_mesh_to(&mesh, &mut out).unwrap();

        let loaded = ObjReader::read_mesh_from(out.as_slice()).unwrap();
        assert_eq!(loaded, mesh);
    }

    #[test]
    fn test_read_polygons_and_relative_indices() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1/1 2/2 3/3 4/4\nf -4 -2 -1\n";
        let mesh = ObjReader::read_mesh_from(text.as_bytes()).unwrap();

        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3], [0, 2, 3]]);
        assert!(mesh.normals.is_none());
    }

    #[test]
    fn test_read_rejects_bad_face() {
        let text = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let result = ObjReader::read_mesh_from(text.as_bytes());
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
