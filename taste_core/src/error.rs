//! Error types for persistence and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing the taste store file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Errors from loading the tracker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
