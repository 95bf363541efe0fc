//! # shapecrate
//!
//! Procedurally generated shapes for GPU rendering.
//!
//! This is the umbrella crate that re-exports the shapecrate crates. Use it to
//! get everything in one place, or depend on the individual crates for finer
//! control over dependencies.
//!
//! ## Quick Start
//!
//! ```rust
//! use shapecrate::prelude::*;
//!
//! let torus = Torus::new(1.0, 0.5, 18, 36)?;
//! assert_eq!(torus.positions().vertex_count(), 648);
//! assert_eq!(torus.indices().len(), 3888);
//!
//! let mesh = torus.to_mesh()?;
//! assert!(mesh.is_closed_and_oriented());
//! # Ok::<(), shapecrate::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables shapes and io
//! - `shapes`: Torus, cube and rectangle generators
//! - `io`: OBJ and JSON export
//! - `all`: Enables all features

// Re-export core functionality
pub use shapecrate_core::*;

#[cfg(feature = "shapes")]
pub use shapecrate_shapes as shapes;

#[cfg(feature = "io")]
pub use shapecrate_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use shapecrate_core::*;

    #[cfg(feature = "shapes")]
    pub use shapecrate_shapes::*;

    #[cfg(feature = "io")]
    pub use shapecrate_io::{read_mesh, write_shape, MeshReader, MeshWriter, ShapeWriter};
}
