//! Error types for shapecrate

use thiserror::Error;

/// Main error type for shapecrate operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shape parameters out of range. The only error a generator raises.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    
    #[error("Invalid data: {0}")]
    InvalidData(String),
    
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Serialization error: {0}")]
    Serialization(String),
    
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl Error {
    /// Shorthand used by the parameter checks of the shape generators
    pub fn invalid_parameter(name: &str, reason: impl std::fmt::Display) -> Self {
        Error::InvalidParameter(format!("{name}: {reason}"))
    }
}

/// Result type alias for shapecrate operations
pub type Result<T> = std::result::Result<T, Error>;
