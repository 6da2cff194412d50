//! Error types for the capability engine

use std::path::PathBuf;
use thiserror::Error;

/// Result type for capability operations
pub type Result<T> = std::result::Result<T, Error>;

/// Capability engine errors
#[derive(Debug, Error)]
pub enum Error {
    /// Query issued before a store was installed
    #[error("Capability engine is not configured: no store installed")]
    NotConfigured,

    /// Invalid argument (absent store, unusable store settings)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Backing data source missing
    #[error("Capability source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Malformed source content or configuration file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Parse(format!("Failed to parse config: {}", err))
    }
}
