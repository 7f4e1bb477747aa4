//! Error types shared by the schema model, catalog and generator.

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed identifier or structurally inconsistent input
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid generation options or config file contents
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unreadable or malformed catalog snapshot
    #[error("catalog error: {0}")]
    Catalog(String),

    /// The catalog holds no database with this name
    #[error("unknown database: {0}")]
    UnknownDatabase(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }
}
