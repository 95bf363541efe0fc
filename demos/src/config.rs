//! Runtime configuration for the demos

use serde::{Deserialize, Serialize};
use shapecrate_core::{Error, Result};
use shapecrate_shapes::TorusParams;
use std::path::Path;

/// Settings shared by the demo commands, loadable from a JSON file.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub torus: TorusParams,
    pub width: u32,
    pub height: u32,
    /// Simulated frames per second of the headless runner
    pub fps: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            torus: TorusParams::default(),
            width: 800,
            height: 600,
            fps: 30.0,
        }
    }
}

impl DemoConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.torus.validate()?;
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid_parameter(
                "width/height",
                format!("must be non-zero, got {}x{}", self.width, self.height),
            ));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(Error::invalid_parameter("fps", format!("must be positive, got {}", self.fps)));
        }
        Ok(())
    }
}
