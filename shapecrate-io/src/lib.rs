//! I/O operations for generated shapes and meshes
//! 
//! This crate writes shapes to Wavefront OBJ (explicit triangles) and to a
//! JSON snapshot that keeps the generated streams and drawing instructions.

pub mod obj;
pub mod json;

pub use obj::{ObjReader, ObjWriter};
pub use json::{JsonWriter, ShapeData};

use shapecrate_core::{Error, Result, ShapeGenerator, TriangleMesh};
use std::path::Path;

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// Trait for writing generated shapes to files
pub trait ShapeWriter {
    fn write_shape<S: ShapeGenerator, P: AsRef<Path>>(shape: &S, path: P) -> Result<()>;
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

/// Auto-detect format and write a shape
pub fn write_shape<S: ShapeGenerator, P: AsRef<Path>>(shape: &S, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjWriter::write_shape(shape, path),
        Some("json") => JsonWriter::write_shape(shape, path),
        _ => Err(Error::UnsupportedFormat(
            format!("Unsupported shape format: {:?}", path.extension())
        )),
    }
}

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => ObjReader::read_mesh(path),
        Some("json") => ShapeData::read(path)?.to_mesh(),
        _ => Err(Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}
