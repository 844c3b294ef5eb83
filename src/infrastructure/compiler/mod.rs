//! Compiler and renderer adapters
//!
//! - `ProcessCompiler` - Runs the configured engine binary
//! - `TomlTemplateRenderer` - `{{ key }}` substitution from a TOML data file

mod process;
mod template;

pub use process::ProcessCompiler;
pub use template::TomlTemplateRenderer;
