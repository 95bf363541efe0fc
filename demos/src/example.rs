//! Example trait and the headless run loop

use crate::config::DemoConfig;
use crate::context::RecordingContext;
use crate::scenes::{CubeExample, NewtonExample, TorusExample};
use serde::Serialize;
use shapecrate_core::{Error, Result};
use tracing::{debug, info};

/// Names accepted by [`make_example`]
pub const EXAMPLE_NAMES: [&str; 3] = ["torus", "cube", "newton"];

/// A renderable scene driven by the run loop
pub trait Example {
    fn name(&self) -> &'static str;

    /// One-time state setup before the first frame
    fn setup(&mut self, _ctx: &mut RecordingContext) {}

    /// Called when the output size changes, and once before the first frame
    fn reshape(&mut self, ctx: &mut RecordingContext, width: u32, height: u32);

    /// Render one frame at `time` seconds since start
    fn render(&mut self, ctx: &mut RecordingContext, time: f64) -> Result<()>;

    /// Whether the run should go on at `time`
    fn should_continue(&self, _time: f64) -> bool {
        true
    }
}

/// Build the example called `name`
pub fn make_example(name: &str, config: &DemoConfig) -> Result<Box<dyn Example>> {
    let example: Box<dyn Example> = match name {
        "torus" => Box::new(TorusExample::new(config.torus)?),
        "cube" => Box::new(CubeExample::new()),
        "newton" => Box::new(NewtonExample::new()),
        other => {
            return Err(Error::invalid_parameter(
                "example",
                format!("unknown example '{other}', expected one of {}", EXAMPLE_NAMES.join(", ")),
            ))
        }
    };
    Ok(example)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunParams {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    /// Upper bound on rendered frames
    pub max_frames: u32,
}

impl RunParams {
    pub fn from_config(config: &DemoConfig, max_frames: u32) -> Self {
        Self {
            width: config.width,
            height: config.height,
            fps: config.fps,
            max_frames,
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub example: &'static str,
    pub frames: u32,
    pub draw_calls: usize,
    /// Time of the last rendered frame, seconds
    pub last_time: f64,
    /// True when the example asked to stop before `max_frames`
    pub finished: bool,
}

/// Drive `example` frame by frame at a fixed simulated frame rate.
///
/// Frame `k` is rendered at `k / fps` seconds. The loop ends after
/// `max_frames` frames or as soon as `should_continue` returns false.
pub fn run_example(
    example: &mut dyn Example,
    ctx: &mut RecordingContext,
    params: RunParams,
) -> Result<RunSummary> {
    if !(params.fps.is_finite() && params.fps > 0.0) {
        return Err(Error::invalid_parameter("fps", format!("must be positive, got {}", params.fps)));
    }
    if params.width == 0 || params.height == 0 {
        return Err(Error::invalid_parameter(
            "width/height",
            format!("must be non-zero, got {}x{}", params.width, params.height),
        ));
    }

    info!(example = example.name(), width = params.width, height = params.height, "starting example");
    example.setup(ctx);
    example.reshape(ctx, params.width, params.height);

    let mut frames = 0;
    let mut last_time = 0.0;
    let mut finished = false;
    while frames < params.max_frames {
        let time = f64::from(frames) / params.fps;
        if !example.should_continue(time) {
            finished = true;
            break;
        }
        example.render(ctx, time)?;
        debug!(frame = frames, time, "rendered frame");
        last_time = time;
        frames += 1;
    }

    let summary = RunSummary {
        example: example.name(),
        frames,
        draw_calls: ctx.draw_call_count(),
        last_time,
        finished,
    };
    info!(frames, draw_calls = summary.draw_calls, finished, "example done");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapecrate_core::PrimitiveType;
    use shapecrate_core::DrawSink;

    struct Blink {
        stop_at: f64,
    }

    impl Example for Blink {
        fn name(&self) -> &'static str {
            "blink"
        }

        fn reshape(&mut self, ctx: &mut RecordingContext, width: u32, height: u32) {
            ctx.set_viewport(width, height);
        }

        fn render(&mut self, ctx: &mut RecordingContext, _time: f64) -> Result<()> {
            ctx.clear();
            ctx.draw_arrays(PrimitiveType::Points, 0, 1);
            Ok(())
        }

        fn should_continue(&self, time: f64) -> bool {
            time < self.stop_at
        }
    }

    fn params(max_frames: u32) -> RunParams {
        RunParams {
            width: 64,
            height: 48,
            fps: 10.0,
            max_frames,
        }
    }

    #[test]
    fn test_run_stops_when_example_says_so() {
        let mut ctx = RecordingContext::new();
        let summary = run_example(&mut Blink { stop_at: 0.5 }, &mut ctx, params(100)).unwrap();

        assert_eq!(summary.frames, 5);
        assert!(summary.finished);
        assert_eq!(ctx.frame_count(), 5);
        assert_eq!(ctx.viewport, (64, 48));
    }

    #[test]
    fn test_run_respects_frame_limit() {
        let mut ctx = RecordingContext::new();
        let summary = run_example(&mut Blink { stop_at: f64::INFINITY }, &mut ctx, params(3)).unwrap();

        assert_eq!(summary.frames, 3);
        assert!(!summary.finished);
        assert!((summary.last_time - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_run_rejects_empty_viewport() {
        let mut example = make_example("torus", &DemoConfig::default()).unwrap();
        let mut ctx = RecordingContext::new();
        let result = run_example(example.as_mut(), &mut ctx, RunParams { width: 0, ..params(1) });

        assert!(matches!(result, Err(Error::InvalidParameter(_))));
        assert_eq!(ctx.frame_count(), 0);
        assert!(run_example(&mut Blink { stop_at: 1.0 }, &mut ctx, RunParams { height: 0, ..params(1) }).is_err());
    }

    #[test]
    fn test_unknown_example() {
        let result = make_example("teapot", &DemoConfig::default());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
        for name in EXAMPLE_NAMES {
            assert_eq!(make_example(name, &DemoConfig::default()).unwrap().name(), name);
        }
    }
}
