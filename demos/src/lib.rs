//! Example harness for shapecrate
//!
//! Examples implement [`Example`] and render into a [`RecordingContext`],
//! a headless stand-in for a graphics context that records state changes
//! and draw submissions instead of executing them.

pub mod camera;
pub mod config;
pub mod context;
pub mod example;
pub mod logging;
pub mod scenes;

pub use config::DemoConfig;
pub use context::{DrawCall, PolygonMode, RecordingContext, Uniform};
pub use example::{make_example, run_example, Example, RunParams, RunSummary, EXAMPLE_NAMES};
pub use logging::{init_logging, LoggingConfig};
