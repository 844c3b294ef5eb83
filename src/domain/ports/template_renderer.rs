//! TemplateRenderer port
//!
//! Produces engine input from a template and its optional data file.

use std::path::{Path, PathBuf};

pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, config_file: Option<&Path>) -> Result<String, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to read data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data file {path}: {message}\n  → Fix: The data file must be a TOML table of values")]
    InvalidData { path: PathBuf, message: String },

    #[error("template references unknown key '{key}'")]
    UnknownKey { key: String },
}

/// Renderer that passes the template through untouched
pub struct PassthroughRenderer;

impl TemplateRenderer for PassthroughRenderer {
    fn render(&self, template: &str, _config_file: Option<&Path>) -> Result<String, RenderError> {
        Ok(template.to_string())
    }
}
