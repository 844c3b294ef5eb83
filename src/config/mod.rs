//! Configuration module for docwatch
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DOCWATCH_*)
//! 3. Project config (`docwatch.toml`, or the file named by `--config`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{load_or_default, ConfigWarning, CONFIG_FILE_NAME};
pub use types::{BuildConfig, Config, TemplateEntry, WatchConfig};
