//! Watch configuration value object
//!
//! Describes what a watch session observes and how it filters changes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default debounce window in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// What to watch and how to filter it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfiguration {
    pub template_file: PathBuf,
    pub config_file: Option<PathBuf>,
    pub exclusion_patterns: Vec<String>,
    pub inclusion_patterns: Vec<String>,
    pub debounce_interval: Duration,
}

impl WatchConfiguration {
    pub fn new(template_file: impl Into<PathBuf>) -> Self {
        Self {
            template_file: template_file.into(),
            config_file: None,
            exclusion_patterns: Vec::new(),
            inclusion_patterns: Vec::new(),
            debounce_interval: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    pub fn with_exclusions<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusion_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_inclusions<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inclusion_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_debounce_interval(mut self, interval: Duration) -> Self {
        self.debounce_interval = interval;
        self
    }

    /// Files whose changes matter to this session (template first)
    pub fn watched_files(&self) -> Vec<&Path> {
        let mut files = vec![self.template_file.as_path()];
        if let Some(config) = &self.config_file {
            files.push(config.as_path());
        }
        files
    }

    /// Parent directories of the watched files, deduplicated.
    ///
    /// A bare file name resolves to the current directory.
    pub fn watch_directories(&self) -> Vec<PathBuf> {
        let dirs: BTreeSet<PathBuf> = self
            .watched_files()
            .into_iter()
            .map(|file| match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            })
            .collect();
        dirs.into_iter().collect()
    }
}
