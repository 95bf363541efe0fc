//! Drawing instructions
//!
//! A generated shape comes with a small plan that says how its index stream
//! is to be split into draw calls. The plan and the index stream always come
//! from the same generator instance and are only meaningful together.

use crate::{traits::DrawSink, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive topology of a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Points,
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl PrimitiveType {
    /// Textual name of the value, empty without the `enum-names` feature
    pub fn name(self) -> &'static str {
        if !cfg!(feature = "enum-names") {
            return "";
        }
        match self {
            PrimitiveType::Points => "Points",
            PrimitiveType::Lines => "Lines",
            PrimitiveType::LineStrip => "LineStrip",
            PrimitiveType::LineLoop => "LineLoop",
            PrimitiveType::Triangles => "Triangles",
            PrimitiveType::TriangleStrip => "TriangleStrip",
            PrimitiveType::TriangleFan => "TriangleFan",
        }
    }

    /// Whether the primitive produces filled triangles
    pub fn is_triangles(self) -> bool {
        matches!(
            self,
            PrimitiveType::Triangles | PrimitiveType::TriangleStrip | PrimitiveType::TriangleFan
        )
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vertex traversal direction defining a triangle's front face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceWinding {
    Clockwise,
    CounterClockwise,
}

impl FaceWinding {
    /// Textual name of the value, empty without the `enum-names` feature
    pub fn name(self) -> &'static str {
        if !cfg!(feature = "enum-names") {
            return "";
        }
        match self {
            FaceWinding::Clockwise => "Clockwise",
            FaceWinding::CounterClockwise => "CounterClockwise",
        }
    }

    /// The opposite winding
    pub fn reversed(self) -> Self {
        match self {
            FaceWinding::Clockwise => FaceWinding::CounterClockwise,
            FaceWinding::CounterClockwise => FaceWinding::Clockwise,
        }
    }
}

impl fmt::Display for FaceWinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a draw operation sources its vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawMethod {
    /// Consecutive vertices `first..first + count`
    DrawArrays,
    /// Indices `first..first + count` of the index stream
    DrawElements,
}

/// One draw submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOperation {
    pub method: DrawMethod,
    pub mode: PrimitiveType,
    pub first: u32,
    pub count: u32,
}

impl DrawOperation {
    /// An indexed draw over `count` indices starting at `first`
    pub fn elements(mode: PrimitiveType, first: u32, count: u32) -> Self {
        Self { method: DrawMethod::DrawElements, mode, first, count }
    }

    /// A non-indexed draw over `count` vertices starting at `first`
    pub fn arrays(mode: PrimitiveType, first: u32, count: u32) -> Self {
        Self { method: DrawMethod::DrawArrays, mode, first, count }
    }

    fn range(&self) -> std::ops::Range<usize> {
        let first = self.first as usize;
        first..first + self.count as usize
    }

    /// The part of `indices` this operation draws, if it is indexed and in bounds
    pub fn index_slice<'a>(&self, indices: &'a [u32]) -> Option<&'a [u32]> {
        match self.method {
            DrawMethod::DrawElements => indices.get(self.range()),
            DrawMethod::DrawArrays => None,
        }
    }

    /// Submit this operation to `sink`
    pub fn draw<S: DrawSink + ?Sized>(&self, indices: &[u32], sink: &mut S) -> Result<()> {
        match self.method {
            DrawMethod::DrawArrays => sink.draw_arrays(self.mode, self.first, self.count),
            DrawMethod::DrawElements => {
                let slice = self.index_slice(indices).ok_or_else(|| {
                    Error::InvalidData(format!(
                        "draw operation {}..{} exceeds index stream of {}",
                        self.first,
                        self.first as usize + self.count as usize,
                        indices.len()
                    ))
                })?;
                sink.draw_elements(self.mode, slice);
            }
        }
        Ok(())
    }
}

/// Ordered list of draw operations partitioning an index stream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingInstructions {
    operations: Vec<DrawOperation>,
}

impl DrawingInstructions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operation: DrawOperation) {
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[DrawOperation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Indexed operations paired with the index ranges they draw.
    ///
    /// Non-indexed operations and operations that run past the end of
    /// `indices` are skipped; use [`validate`](Self::validate) to catch the
    /// latter.
    pub fn slices<'a>(
        &'a self,
        indices: &'a [u32],
    ) -> impl Iterator<Item = (&'a DrawOperation, &'a [u32])> + 'a {
        self.operations
            .iter()
            .filter_map(move |op| op.index_slice(indices).map(|slice| (op, slice)))
    }

    /// Check every operation against the sizes of the streams it refers to
    pub fn validate(&self, index_count: usize, vertex_count: usize) -> Result<()> {
        for (n, op) in self.operations.iter().enumerate() {
            let (limit, what) = match op.method {
                DrawMethod::DrawElements => (index_count, "indices"),
                DrawMethod::DrawArrays => (vertex_count, "vertices"),
            };
            if op.range().end > limit {
                return Err(Error::InvalidData(format!(
                    "draw operation {n} ({}) covers {}..{} but only {limit} {what} exist",
                    op.mode,
                    op.first,
                    op.range().end
                )));
            }
        }
        Ok(())
    }

    /// Issue every operation, in order, to `sink`
    pub fn draw<S: DrawSink + ?Sized>(&self, indices: &[u32], sink: &mut S) -> Result<()> {
        for op in &self.operations {
            op.draw(indices, sink)?;
        }
        Ok(())
    }
}

impl FromIterator<DrawOperation> for DrawingInstructions {
    fn from_iter<I: IntoIterator<Item = DrawOperation>>(iter: I) -> Self {
        Self { operations: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a DrawingInstructions {
    type Item = &'a DrawOperation;
    type IntoIter = std::slice::Iter<'a, DrawOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Calls(Vec<(PrimitiveType, Vec<u32>)>);

    impl DrawSink for Calls {
        fn draw_arrays(&mut self, mode: PrimitiveType, first: u32, count: u32) {
            self.0.push((mode, (first..first + count).collect()));
        }

        fn draw_elements(&mut self, mode: PrimitiveType, indices: &[u32]) {
            self.0.push((mode, indices.to_vec()));
        }
    }

    fn two_strips() -> DrawingInstructions {
        [
            DrawOperation::elements(PrimitiveType::TriangleStrip, 0, 4),
            DrawOperation::elements(PrimitiveType::TriangleStrip, 4, 4),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_slices_partition_indices() {
        let indices = [0, 1, 2, 3, 2, 3, 4, 5];
        let instructions = two_strips();

        let joined: Vec<u32> = instructions
            .slices(&indices)
            .flat_map(|(_, s)| s.iter().copied())
            .collect();
        assert_eq!(joined, indices);
    }

    #[test]
    fn test_validate() {
        let instructions = two_strips();
        assert!(instructions.validate(8, 6).is_ok());
        assert!(matches!(instructions.validate(7, 6), Err(Error::InvalidData(_))));

        let arrays: DrawingInstructions =
            std::iter::once(DrawOperation::arrays(PrimitiveType::TriangleStrip, 0, 4)).collect();
        assert!(arrays.validate(0, 4).is_ok());
        assert!(arrays.validate(0, 3).is_err());
    }

    #[test]
    fn test_draw_dispatches_by_method() {
        let mut instructions = two_strips();
        instructions.push(DrawOperation::arrays(PrimitiveType::Points, 2, 2));

        let indices = [0, 1, 2, 3, 2, 3, 4, 5];
        let mut calls = Calls::default();
        instructions.draw(&indices, &mut calls).unwrap();

        assert_eq!(calls.0.len(), 3);
        assert_eq!(calls.0[1], (PrimitiveType::TriangleStrip, vec![2, 3, 4, 5]));
        assert_eq!(calls.0[2], (PrimitiveType::Points, vec![2, 3]));
    }

    #[test]
    fn test_draw_out_of_bounds() {
        let mut calls = Calls::default();
        assert!(two_strips().draw(&[0, 1, 2], &mut calls).is_err());
    }

    #[test]
    fn test_winding() {
        assert_eq!(FaceWinding::Clockwise.reversed(), FaceWinding::CounterClockwise);
        assert!(PrimitiveType::TriangleFan.is_triangles());
        assert!(!PrimitiveType::LineLoop.is_triangles());
    }

    #[cfg(feature = "enum-names")]
    #[test]
    fn test_enum_names() {
        assert_eq!(PrimitiveType::TriangleStrip.to_string(), "TriangleStrip");
        assert_eq!(FaceWinding::CounterClockwise.name(), "CounterClockwise");
    }
}
