//! Headless rendering context
//!
//! Stands in for a device context. State setters mirror what an example
//! would configure on a real device; draw submissions are recorded per
//! frame so a run can be inspected afterwards.

use nalgebra::Matrix4;
use shapecrate_core::{DrawMethod, DrawSink, FaceWinding, PrimitiveType};
use std::collections::HashMap;
use tracing::trace;

/// Rasterization mode for polygons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// Value of a shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Float(f32),
    Vec3([f32; 3]),
    Mat4(Matrix4<f32>),
}

impl From<f32> for Uniform {
    fn from(value: f32) -> Self {
        Uniform::Float(value)
    }
}

impl From<[f32; 3]> for Uniform {
    fn from(value: [f32; 3]) -> Self {
        Uniform::Vec3(value)
    }
}

impl From<Matrix4<f32>> for Uniform {
    fn from(value: Matrix4<f32>) -> Self {
        Uniform::Mat4(value)
    }
}

/// One recorded draw submission
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub method: DrawMethod,
    pub mode: PrimitiveType,
    /// Vertices (arrays) or indices (elements) consumed
    pub count: u32,
    pub polygon_mode: PolygonMode,
    pub front_face: FaceWinding,
    pub pipeline: Option<&'static str>,
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    pub clear_color: [f32; 4],
    pub clear_depth: f32,
    pub depth_test: bool,
    pub front_face: Option<FaceWinding>,
    pub polygon_mode: Option<PolygonMode>,
    pub viewport: (u32, u32),
    pipeline: Option<&'static str>,
    uniforms: HashMap<(Option<&'static str>, String), Uniform>,
    frames: Vec<Vec<DrawCall>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self {
            clear_depth: 1.0,
            ..Self::default()
        }
    }

    /// Clear the color and depth buffers, starting a new frame
    pub fn clear(&mut self) {
        self.frames.push(Vec::new());
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Make `name` the pipeline subsequent uniforms and draws apply to
    pub fn bind_pipeline(&mut self, name: &'static str) {
        self.pipeline = Some(name);
    }

    pub fn unbind_pipeline(&mut self) {
        self.pipeline = None;
    }

    /// Set a uniform of `program`
    pub fn set_uniform(&mut self, program: &'static str, name: &str, value: impl Into<Uniform>) {
        self.uniforms.insert((Some(program), name.to_string()), value.into());
    }

    /// Set a uniform that is not tied to a program
    pub fn set_global_uniform(&mut self, name: &str, value: impl Into<Uniform>) {
        self.uniforms.insert((None, name.to_string()), value.into());
    }

    pub fn uniform(&self, program: Option<&'static str>, name: &str) -> Option<&Uniform> {
        self.uniforms.get(&(program, name.to_string()))
    }

    /// Number of frames started with [`clear`](Self::clear)
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Draw calls of the most recent frame
    pub fn last_frame(&self) -> &[DrawCall] {
        self.frames.last().map(Vec::as_slice).unwrap_or_default()
    }

    /// Draw calls of every recorded frame, oldest first
    pub fn frames(&self) -> &[Vec<DrawCall>] {
        &self.frames
    }

    /// Total number of draw calls recorded
    pub fn draw_call_count(&self) -> usize {
        self.frames.iter().map(Vec::len).sum()
    }

    fn record(&mut self, method: DrawMethod, mode: PrimitiveType, count: u32) {
        let call = DrawCall {
            method,
            mode,
            count,
            polygon_mode: self.polygon_mode.unwrap_or(PolygonMode::Fill),
            front_face: self.front_face.unwrap_or(FaceWinding::CounterClockwise),
            pipeline: self.pipeline,
        };
        trace!(method = ?call.method, mode = %call.mode, count, pipeline = ?call.pipeline, "draw");
        if self.frames.is_empty() {
            self.frames.push(Vec::new());
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.push(call);
        }
    }
}

impl DrawSink for RecordingContext {
    fn draw_arrays(&mut self, mode: PrimitiveType, _first: u32, count: u32) {
        self.record(DrawMethod::DrawArrays, mode, count);
    }

    fn draw_elements(&mut self, mode: PrimitiveType, indices: &[u32]) {
        self.record(DrawMethod::DrawElements, mode, indices.len() as u32);
    }
}
