//! `{{ key }}` substitution from a TOML data file
//!
//! Keys are dotted paths into the data file (`{{ author.name }}`). Strings
//! are inserted verbatim, other scalars via their TOML representation.

use std::fs;
use std::path::Path;

use crate::domain::ports::{RenderError, TemplateRenderer};

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlTemplateRenderer;

impl TomlTemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<toml::Table, RenderError> {
        let content = fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content
            .parse::<toml::Table>()
            .map_err(|e| RenderError::InvalidData {
                path: path.to_path_buf(),
                message: e.message().to_string(),
            })
    }
}

impl TemplateRenderer for TomlTemplateRenderer {
    fn render(&self, template: &str, config_file: Option<&Path>) -> Result<String, RenderError> {
        let Some(path) = config_file else {
            return Ok(template.to_string());
        };
        let data = Self::load(path)?;
        substitute(template, &data)
    }
}

fn substitute(template: &str, data: &toml::Table) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open + 2..].find("}}") else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = rest[open + 2..open + 2 + close].trim();
        out.push_str(&lookup(data, key)?);
        rest = &rest[open + 2 + close + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

fn lookup(data: &toml::Table, key: &str) -> Result<String, RenderError> {
    let unknown = || RenderError::UnknownKey {
        key: key.to_string(),
    };

    let mut parts = key.split('.');
    let first = parts.next().ok_or_else(unknown)?;
    let mut value = data.get(first).ok_or_else(unknown)?;
    for part in parts {
        value = value.get(part).ok_or_else(unknown)?;
    }

    Ok(match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
