//! Error types for database operations.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Native DB error.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored value could not be converted back.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Row not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<Error> for idleworks_core::Error {
    fn from(err: Error) -> Self {
        idleworks_core::Error::Persistence(err.to_string())
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;
