//! Flat vertex attribute streams

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A flat sequence of `f32` values grouped into fixed-size tuples.
///
/// This is the form in which vertex attributes are uploaded into a device
/// buffer and bound to an attribute slot: the slot is configured with
/// [`values_per_vertex`](Self::values_per_vertex) components per vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAttributeStream")]
pub struct AttributeStream {
    values_per_vertex: usize,
    data: Vec<f32>,
}

/// Unchecked serialized form, validated through [`AttributeStream::from_vec`]
#[derive(Deserialize)]
struct RawAttributeStream {
    values_per_vertex: usize,
    data: Vec<f32>,
}

impl TryFrom<RawAttributeStream> for AttributeStream {
    type Error = Error;

    fn try_from(raw: RawAttributeStream) -> Result<Self> {
        Self::from_vec(raw.values_per_vertex, raw.data)
    }
}

impl AttributeStream {
    /// Create an empty stream of `values_per_vertex`-tuples
    pub fn new(values_per_vertex: usize) -> Self {
        Self::with_capacity(values_per_vertex, 0)
    }

    /// Create an empty stream with room for `vertex_count` tuples
    pub fn with_capacity(values_per_vertex: usize, vertex_count: usize) -> Self {
        assert!(
            (1..=4).contains(&values_per_vertex),
            "attribute arity must be between 1 and 4"
        );
        Self {
            values_per_vertex,
            data: Vec::with_capacity(values_per_vertex * vertex_count),
        }
    }

    /// Wrap existing data, checking that it splits evenly into tuples
    pub fn from_vec(values_per_vertex: usize, data: Vec<f32>) -> Result<Self> {
        if !(1..=4).contains(&values_per_vertex) {
            return Err(Error::InvalidData(format!(
                "attribute arity must be between 1 and 4, got {values_per_vertex}"
            )));
        }
        if data.len() % values_per_vertex != 0 {
            return Err(Error::InvalidData(format!(
                "{} values do not form whole {}-tuples",
                data.len(),
                values_per_vertex
            )));
        }
        Ok(Self { values_per_vertex, data })
    }

    /// Append one tuple
    pub fn push<const N: usize>(&mut self, tuple: [f32; N]) {
        debug_assert_eq!(N, self.values_per_vertex);
        self.data.extend_from_slice(&tuple);
    }

    /// Number of values per tuple
    pub fn values_per_vertex(&self) -> usize {
        self.values_per_vertex
    }

    /// Number of tuples in the stream
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.values_per_vertex
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The tuple at `index`
    pub fn get(&self, index: usize) -> Option<&[f32]> {
        let start = index.checked_mul(self.values_per_vertex)?;
        self.data.get(start..start + self.values_per_vertex)
    }

    /// Iterate over tuples
    pub fn tuples(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.values_per_vertex)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Raw bytes, ready for a buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl AsRef<[f32]> for AttributeStream {
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}
