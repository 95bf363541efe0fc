//! Integration tests for shapecrate-demos
//!
//! These run the examples end to end through the harness and check the
//! files the demo commands produce.

use approx::assert_relative_eq;
use shapecrate_core::{FaceWinding, ShapeGenerator};
use shapecrate_demos::scenes::NewtonExample;
use shapecrate_demos::*;
use shapecrate_shapes::Torus;
use tempfile::tempdir;

fn run(name: &str, config: &DemoConfig, max_frames: u32) -> (RunSummary, RecordingContext) {
    let mut example = make_example(name, config).unwrap();
    let mut ctx = RecordingContext::new();
    let summary = run_example(example.as_mut(), &mut ctx, RunParams::from_config(config, max_frames)).unwrap();
    (summary, ctx)
}

#[test]
fn test_torus_example_runs_for_a_minute() {
    let (summary, ctx) = run("torus", &DemoConfig::default(), 5000);

    assert!(summary.finished);
    assert_eq!(summary.frames, 1800);
    assert_eq!(summary.draw_calls, 3600);
    assert!(summary.last_time < 60.0);
    assert_eq!(ctx.frame_count(), 1800);
    assert_eq!(ctx.front_face, Some(FaceWinding::CounterClockwise));
    assert_eq!(ctx.clear_color, [0.7, 0.6, 0.5, 0.0]);
    assert!(ctx.depth_test);
}

#[test]
fn test_examples_without_time_limit() {
    for name in ["cube", "newton"] {
        let (summary, ctx) = run(name, &DemoConfig::default(), 10);
        assert!(!summary.finished, "{name} stopped early");
        assert_eq!(summary.frames, 10);
        assert_eq!(ctx.viewport, (800, 600));
        assert!(ctx.frames().iter().all(|frame| frame.len() == 1));
    }
}

#[test]
fn test_config_file_drives_torus() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("demo.json");
    std::fs::write(
        &path,
        r#"{ "torus": { "rings": 6, "segments": 8, "topology": "strips" }, "fps": 10 }"#,
    )
    .unwrap();

    let config = DemoConfig::load(&path).unwrap();
    let (summary, ctx) = run("torus", &config, 3);

    assert_eq!(summary.frames, 3);
    assert_relative_eq!(summary.last_time, 0.2);
    // one strip per ring, drawn filled and as wireframe
    assert_eq!(ctx.last_frame().len(), 12);
    assert!(ctx.last_frame().iter().all(|call| call.count == 18));
}

#[test]
fn test_exported_torus_reads_back() {
    let dir = tempdir().unwrap();
    let config = DemoConfig::default();
    let torus = Torus::from_params(config.torus).unwrap();

    for file in ["torus.obj", "torus.json"] {
        let path = dir.path().join(file);
        shapecrate_io::write_shape(&torus, &path).unwrap();
        let mesh = shapecrate_io::read_mesh(&path).unwrap();

        assert_eq!(mesh.vertex_count(), 648);
        assert_eq!(mesh.face_count(), 1296);
        assert!(mesh.is_closed_and_oriented());
        assert_eq!(mesh, torus.to_mesh().unwrap(), "{file}");
    }
}

#[test]
fn test_newton_image_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("newton.ppm");
    let file = std::fs::File::create(&path).unwrap();
    NewtonExample::new().write_ppm(file, 32, 16).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"P6\n32 16\n255\n"));
    assert_eq!(bytes.len(), b"P6\n32 16\n255\n".len() + 32 * 16 * 3);
}

#[test]
fn test_logging_initializes_once() {
    init_logging(LoggingConfig {
        env_filter: Some("shapecrate=trace".to_string()),
        ansi: false,
    });
    init_logging(LoggingConfig::default());
}
