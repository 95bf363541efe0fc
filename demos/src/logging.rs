//! Logging setup for the demo binaries

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Logger configuration.
///
/// `env_filter` uses the `tracing_subscriber::EnvFilter` directive syntax
/// (e.g. "info", "shapecrate_shapes=debug"). When unset, `RUST_LOG` is used,
/// and `info` when that is unset too.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            ansi: true,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global subscriber once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .as_deref()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"));

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.ansi)
            .with_target(true)
            .try_init();

        if installed.is_ok() {
            tracing::debug!("logging initialized");
        }
    });
}
