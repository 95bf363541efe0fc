use crate::camera::{degrees, looking_at, perspective};
use crate::context::RecordingContext;
use crate::example::Example;
use nalgebra::Point3;
use shapecrate_core::{Result, ShapeGenerator};
use shapecrate_shapes::Cube;

/// A cube colored by its normals, seen from a fixed corner
pub struct CubeExample {
    cube: Cube,
}

impl CubeExample {
    pub fn new() -> Self {
        Self { cube: Cube::new() }
    }

    /// Per-vertex RGB colors: the absolute value of each normal
    pub fn vertex_colors(&self) -> Vec<[f32; 3]> {
        self.cube
            .normals()
            .tuples()
            .map(|n| [n[0].abs(), n[1].abs(), n[2].abs()])
            .collect()
    }
}

impl Default for CubeExample {
    fn default() -> Self {
        Self::new()
    }
}

impl Example for CubeExample {
    fn name(&self) -> &'static str {
        "cube"
    }

    fn setup(&mut self, ctx: &mut RecordingContext) {
        ctx.clear_color = [1.0, 1.0, 1.0, 0.0];
        ctx.depth_test = true;
        ctx.front_face = Some(self.cube.face_winding());
        ctx.set_global_uniform(
            "CameraMatrix",
            looking_at(Point3::new(1.0, 1.0, 1.0), Point3::origin()),
        );
    }

    fn reshape(&mut self, ctx: &mut RecordingContext, width: u32, height: u32) {
        ctx.set_viewport(width, height);
        let aspect = width as f32 / height.max(1) as f32;
        ctx.set_global_uniform("ProjectionMatrix", perspective(degrees(48.0), aspect, 1.0, 100.0));
    }

    fn render(&mut self, ctx: &mut RecordingContext, _time: f64) -> Result<()> {
        ctx.clear();
        self.cube.draw(ctx)
    }
}
