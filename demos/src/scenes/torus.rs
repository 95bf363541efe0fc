use crate::camera::{degrees, full_circles, perspective, sine_wave, OrbitCamera};
use crate::context::{PolygonMode, RecordingContext};
use crate::example::Example;
use nalgebra::Point3;
use shapecrate_core::{Result, ShapeGenerator, Transform3D};
use shapecrate_shapes::{Torus, TorusParams};

const FACE: &str = "face";
const FRAME: &str = "frame";

/// Seconds after which the example stops
const DURATION: f64 = 60.0;

const LIGHT_POS: [f32; 3] = [4.0, 4.0, -8.0];
const TOP_COLOR: [f32; 3] = [0.2, 0.2, 0.2];
const SIDE_COLOR: [f32; 3] = [0.9, 0.9, 0.2];
const EDGE_COLOR: [f32; 3] = [0.0, 0.0, 0.0];

/// A rotating torus seen from an orbiting camera, drawn filled and then
/// as a wireframe on top.
pub struct TorusExample {
    torus: Torus,
}

impl TorusExample {
    pub fn new(params: TorusParams) -> Result<Self> {
        Ok(Self {
            torus: Torus::from_params(params)?,
        })
    }

    pub fn torus(&self) -> &Torus {
        &self.torus
    }
}

impl Example for TorusExample {
    fn name(&self) -> &'static str {
        "torus"
    }

    fn setup(&mut self, ctx: &mut RecordingContext) {
        ctx.clear_color = [0.7, 0.6, 0.5, 0.0];
        ctx.clear_depth = 1.0;
        ctx.depth_test = true;
        ctx.front_face = Some(self.torus.face_winding());

        ctx.set_global_uniform("LightPos", LIGHT_POS);
        ctx.set_uniform(FACE, "TopColor", TOP_COLOR);
        ctx.set_uniform(FACE, "SideColor", SIDE_COLOR);
        ctx.set_uniform(FRAME, "EdgeColor", EDGE_COLOR);
    }

    fn reshape(&mut self, ctx: &mut RecordingContext, width: u32, height: u32) {
        ctx.set_viewport(width, height);
        let aspect = width as f32 / height.max(1) as f32;
        ctx.set_global_uniform("ProjectionMatrix", perspective(degrees(48.0), aspect, 1.0, 100.0));
    }

    fn render(&mut self, ctx: &mut RecordingContext, time: f64) -> Result<()> {
        let t = time as f32;
        ctx.clear();

        let camera = OrbitCamera::new(
            Point3::origin(),
            3.5,
            degrees(t * 35.0),
            degrees(sine_wave(t / 30.0) * 60.0),
        );
        let model = Transform3D::rotation_y(full_circles(t * 0.25))
            * Transform3D::rotation_x(full_circles(t * 0.33));
        ctx.set_global_uniform("CameraMatrix", camera.view_matrix());
        ctx.set_global_uniform("ModelMatrix", model.matrix);
        ctx.set_global_uniform("Time", t);

        ctx.bind_pipeline(FACE);
        ctx.polygon_mode = Some(PolygonMode::Fill);
        self.torus.draw(ctx)?;

        ctx.bind_pipeline(FRAME);
        ctx.polygon_mode = Some(PolygonMode::Line);
        self.torus.draw(ctx)?;

        ctx.unbind_pipeline();
        ctx.polygon_mode = Some(PolygonMode::Fill);
        Ok(())
    }

    fn should_continue(&self, time: f64) -> bool {
        time < DURATION
    }
}
