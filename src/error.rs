//! Error types for docwatch
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::{OrchestratorError, WatchError};

/// Result type alias for docwatch operations
pub type DocwatchResult<T> = Result<T, DocwatchError>;

/// Main error type for docwatch operations
#[derive(Error, Debug)]
pub enum DocwatchError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// No template given on the command line or in the config
    #[error("no templates to build - pass --template or add [[templates]] to {config}")]
    NoTemplates { config: String },

    /// Template file does not exist
    #[error("template not found: {path}")]
    TemplateNotFound { path: PathBuf },

    #[error(transparent)]
    Watch(#[from] WatchError),

    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),
}
