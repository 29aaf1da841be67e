// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipfetchError {
    /// A second `start` while a job is active is rejected, never queued.
    #[error("a job is already running")]
    JobAlreadyRunning,

    #[error("failed to launch '{}': {source}", program.display())]
    Launch {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("required tool not found: {}", .0.display())]
    ToolNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ClipfetchError>;
