//! Compile-time configuration
//!
//! Optional behavior is selected with Cargo features; this module reports
//! which ones a build was made with.

use serde::Serialize;

/// Switches a build of `shapecrate-core` was compiled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildConfig {
    /// `enum-names`: enumerated values report textual names
    pub enum_names: bool,
    /// Crate version
    pub version: &'static str,
}

impl BuildConfig {
    /// Configuration of the running build
    pub const fn current() -> Self {
        Self {
            enum_names: cfg!(feature = "enum-names"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::current()
    }
}
