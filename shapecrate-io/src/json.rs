//! JSON snapshots of generated shapes
//!
//! Unlike OBJ, a snapshot keeps the shape exactly as generated: flat
//! attribute streams, the index stream and the drawing instructions. A
//! loaded snapshot is itself a [`ShapeGenerator`] and can be drawn as-is.

use crate::ShapeWriter;
use serde::{Deserialize, Serialize};
use shapecrate_core::{
    AttributeStream, DrawingInstructions, Error, FaceWinding, Result, ShapeGenerator,
};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::debug;

/// Owned copy of everything a [`ShapeGenerator`] exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeData {
    pub face_winding: FaceWinding,
    pub positions: AttributeStream,
    pub normals: AttributeStream,
    pub tex_coords: AttributeStream,
    pub indices: Vec<u32>,
    pub instructions: DrawingInstructions,
}

impl ShapeData {
    /// Copy the streams of `shape`
    pub fn capture<S: ShapeGenerator + ?Sized>(shape: &S) -> Self {
        Self {
            face_winding: shape.face_winding(),
            positions: shape.positions().clone(),
            normals: shape.normals().clone(),
            tex_coords: shape.tex_coords().clone(),
            indices: shape.indices().to_vec(),
            instructions: shape.instructions().clone(),
        }
    }

    /// Check that the streams are mutually consistent
    pub fn validate(&self) -> Result<()> {
        let arities = [
            ("positions", &self.positions, 3),
            ("normals", &self.normals, 3),
            ("tex_coords", &self.tex_coords, 2),
        ];
        for (name, stream, arity) in arities {
            if stream.values_per_vertex() != arity {
                return Err(Error::InvalidData(format!(
                    "{name} must have {arity} values per vertex, found {}",
                    stream.values_per_vertex()
                )));
            }
            if stream.len() % arity != 0 {
                return Err(Error::InvalidData(format!("{name} has a partial tuple")));
            }
        }

        let vertex_count = self.positions.vertex_count();
        if self.normals.vertex_count() != vertex_count || self.tex_coords.vertex_count() != vertex_count {
            return Err(Error::InvalidData("attribute streams differ in length".to_string()));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(Error::InvalidData(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }
        self.instructions.validate(self.indices.len(), vertex_count)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Parse and validate a snapshot
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let data: Self =
            serde_json::from_reader(reader).map_err(|e| Error::Serialization(e.to_string()))?;
        data.validate()?;
        Ok(data)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl ShapeGenerator for ShapeData {
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
        self.face_winding
    }
}

pub struct JsonWriter;

impl ShapeWriter for JsonWriter {
    fn write_shape<S: ShapeGenerator, P: AsRef<Path>>(shape: &S, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        ShapeData::capture(shape).to_writer(&mut writer)?;
        writer.flush()?;
        debug!(path = %path.as_ref().display(), vertices = shape.vertex_count(), "wrote JSON shape");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecrate_shapes::{Rectangle, Torus, TorusParams, TorusTopology};

    #[test]
    fn test_snapshot_keeps_instructions() {
        let params = TorusParams::new(1.0, 0.5, 4, 6).with_topology(TorusTopology::Strips);
        let torus = Torus::from_params(params).unwrap();

        let mut out = Vec::new();
        ShapeData::capture(&torus).to_writer(&mut out).unwrap();
        let loaded = ShapeData::from_reader(out.as_slice()).unwrap();

        assert_eq!(loaded.instructions, *torus.instructions());
        assert_eq!(loaded.indices, torus.indices());
        assert_eq!(loaded.face_winding, FaceWinding::CounterClockwise);
        assert_eq!(loaded.to_mesh().unwrap(), torus.to_mesh().unwrap());
    }

    #[test]
    fn test_snapshot_of_non_indexed_shape() {
        let data = ShapeData::capture(&Rectangle::new());
        assert!(data.indices.is_empty());
        assert!(data.validate().is_ok());
        assert_eq!(data.face_winding, FaceWinding::Clockwise);
    }

    #[test]
    fn test_rejects_inconsistent_snapshot() {
        let mut data = ShapeData::capture(&Torus::new(1.0, 0.5, 3, 3).unwrap());
        data.indices.push(9);
        assert!(matches!(data.validate(), Err(Error::InvalidData(_))));

        let mut data = ShapeData::capture(&Torus::new(1.0, 0.5, 3, 3).unwrap());
        data.indices.truncate(10);
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = ShapeData::from_reader("{ \"indices\": [".as_bytes());
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
