//! Newton fractal for z³ - 1 on a full-screen rectangle
//!
//! The rectangle covers clip space and each pixel's position doubles as
//! the starting point of the iteration. The color is evaluated on the CPU
//! so the image can be written out without a device.

use crate::context::RecordingContext;
use crate::example::Example;
use shapecrate_core::{Error, Result, ShapeGenerator};
use shapecrate_shapes::Rectangle;
use std::io::Write;
use tracing::debug;

pub const NEWTON_MAX_ITERATIONS: u32 = 128;

const CONVERGENCE: f32 = 0.00001;
const COLOR_START: [f32; 3] = [0.2, 0.02, 0.05];
const COLOR_END: [f32; 3] = [1.0, 0.95, 0.98];

type Complex = [f32; 2];

fn f(z: Complex) -> Complex {
    let [x, y] = z;
    [x * x * x - 3.0 * x * y * y - 1.0, -y * y * y + 3.0 * x * x * y]
}

fn df(z: Complex) -> Complex {
    let [x, y] = z;
    [3.0 * (x * x - y * y), 3.0 * (2.0 * x * y)]
}

/// `a / b`, or `a` itself when `b` is zero
fn cdiv(a: Complex, b: Complex) -> Complex {
    let d = b[0] * b[0] + b[1] * b[1];
    if d == 0.0 {
        return a;
    }
    [(a[0] * b[0] + a[1] * b[1]) / d, (a[1] * b[0] - a[0] * b[1]) / d]
}

/// Newton steps taken from `c` before the iterate stops moving
pub fn newton_iterations(c: Complex) -> u32 {
    let mut z = c;
    for i in 0..NEWTON_MAX_ITERATIONS {
        let step = cdiv(f(z), df(z));
        let zn = [z[0] - step[0], z[1] - step[1]];
        if (zn[0] - z[0]).hypot(zn[1] - z[1]) < CONVERGENCE {
            return i;
        }
        z = zn;
    }
    NEWTON_MAX_ITERATIONS
}

/// Color of point `c`, mixed between the two endpoint colors by iteration count
pub fn newton_color(c: Complex, start: [f32; 3], end: [f32; 3]) -> [f32; 3] {
    let t = newton_iterations(c) as f32 / NEWTON_MAX_ITERATIONS as f32;
    std::array::from_fn(|k| start[k] + (end[k] - start[k]) * t)
}

pub struct NewtonExample {
    rectangle: Rectangle,
    start: [f32; 3],
    end: [f32; 3],
}

impl NewtonExample {
    pub fn new() -> Self {
        Self {
            rectangle: Rectangle::new(),
            start: COLOR_START,
            end: COLOR_END,
        }
    }

    /// Evaluate the fractal into packed RGB bytes, top row first.
    ///
    /// Pixel centers are mapped onto the [-1, 1] square covered by the rectangle.
    pub fn render_image(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_parameter(
                "width/height",
                format!("must be non-zero, got {width}x{height}"),
            ));
        }

        let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
        for py in 0..height {
            let y = 1.0 - (py as f32 + 0.5) / height as f32 * 2.0;
            for px in 0..width {
                let x = (px as f32 + 0.5) / width as f32 * 2.0 - 1.0;
                let color = newton_color([x, y], self.start, self.end);
                rgb.extend(color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8));
            }
        }
        Ok(rgb)
    }

    /// Write the fractal as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut writer: W, width: u32, height: u32) -> Result<()> {
        let rgb = self.render_image(width, height)?;
        write!(writer, "P6\n{width} {height}\n255\n")?;
        writer.write_all(&rgb)?;
        writer.flush()?;
        debug!(width, height, "wrote newton image");
        Ok(())
    }
}

impl Default for NewtonExample {
    fn default() -> Self {
        Self::new()
    }
}

impl Example for NewtonExample {
    fn name(&self) -> &'static str {
        "newton"
    }

    fn setup(&mut self, ctx: &mut RecordingContext) {
        ctx.set_global_uniform("c1", self.start);
        ctx.set_global_uniform("c2", self.end);
    }

    fn reshape(&mut self, ctx: &mut RecordingContext, width: u32, height: u32) {
        ctx.set_viewport(width, height);
    }

    fn render(&mut self, ctx: &mut RecordingContext, _time: f64) -> Result<()> {
        ctx.clear();
        self.rectangle.draw(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecrate_core::{DrawMethod, PrimitiveType};

    #[test]
    fn test_iteration_counts() {
        // root of z³ - 1
        assert_eq!(newton_iterations([1.0, 0.0]), 0);
        // zero derivative, the step falls back to f(z) and lands on the root
        assert_eq!(newton_iterations([0.0, 0.0]), 1);
        assert!(newton_iterations([-0.5, 0.8]) < NEWTON_MAX_ITERATIONS);
    }

    #[test]
    fn test_color_endpoints() {
        assert_eq!(newton_color([1.0, 0.0], COLOR_START, COLOR_END), COLOR_START);
    }

    #[test]
    fn test_ppm_layout() {
        let mut out = Vec::new();
        NewtonExample::new().write_ppm(&mut out, 4, 3).unwrap();

        let header = b"P6\n4 3\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(out.len(), header.len() + 4 * 3 * 3);
        assert!(NewtonExample::new().render_image(0, 3).is_err());
    }

    #[test]
    fn test_draws_rectangle_without_indices() {
        let mut example = NewtonExample::new();
        let mut ctx = RecordingContext::new();
        example.setup(&mut ctx);
        example.render(&mut ctx, 0.0).unwrap();

        let call = &ctx.last_frame()[0];
        assert_eq!(call.method, DrawMethod::DrawArrays);
        assert_eq!(call.mode, PrimitiveType::TriangleStrip);
        assert_eq!(call.count, 4);
    }
}
