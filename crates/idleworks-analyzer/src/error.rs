//! Error types for idleworks-analyzer

use thiserror::Error;

/// Analysis error type
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid level range
    #[error("Invalid level range: {0}..={1}")]
    InvalidLevelRange(u32, u32),

    /// The resource is not one of the config's costs
    #[error("Resource {resource} is not a cost of {action}")]
    UnknownResource { resource: String, action: String },

    /// Export error
    #[error("Export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, Error>;
