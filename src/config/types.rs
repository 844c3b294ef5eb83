//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::application::DEFAULT_ENGINE;
use crate::domain::entities::CompilationTask;
use crate::domain::value_objects::{WatchConfiguration, DEFAULT_DEBOUNCE_MS};
use crate::error::DocwatchResult;

use super::loader::{self, ConfigWarning};

/// Engine and batch settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildConfig {
    #[serde(default = "default_engine")]
    pub engine: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Worker threads for batch builds (available parallelism if unset)
    #[serde(default)]
    pub concurrency: Option<usize>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            output_dir: default_output_dir(),
            concurrency: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_engine() -> String {
    DEFAULT_ENGINE.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_timeout_secs() -> u64 {
    300
}

/// Watch-mode filtering and debouncing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WatchConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Extra files whose changes trigger a rebuild (images, includes)
    #[serde(default)]
    pub include: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            exclude: default_exclude(),
            include: Vec::new(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

/// Engine by-products and editor swap files
fn default_exclude() -> Vec<String> {
    [
        "*.aux", "*.log", "*.out", "*.toc", "*.fls", "*.fdb_latexmk", "*.synctex.gz", "*.pdf",
        "*.swp", "*~",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// One `[[templates]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateEntry {
    pub template: PathBuf,

    #[serde(default)]
    pub data: Option<PathBuf>,

    #[serde(default)]
    pub priority: i32,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl TemplateEntry {
    /// Build task with paths resolved against `base`
    pub fn to_task(&self, base: &Path) -> CompilationTask {
        let mut task = CompilationTask::new(base.join(&self.template)).with_priority(self.priority);
        if let Some(data) = &self.data {
            task = task.with_config(base.join(data));
        }
        // zero means "use [build] timeout_secs"
        if let Some(secs) = self.timeout_secs.filter(|&secs| secs > 0) {
            task = task.with_timeout(Duration::from_secs(secs));
        }
        task
    }
}

/// Project configuration (`docwatch.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DocwatchResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DocwatchResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (DOCWATCH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.watch.debounce_ms)
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.build.timeout_secs)
    }

    /// Output directory resolved against `base`
    pub fn output_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.build.output_dir)
    }

    /// Tasks for every `[[templates]]` entry
    pub fn tasks(&self, base: &Path) -> Vec<CompilationTask> {
        self.templates.iter().map(|t| t.to_task(base)).collect()
    }

    /// Watch configuration for one template.
    ///
    /// Only the template, its data file and `[watch] include` patterns
    /// trigger rebuilds; the output directory (resolved against `base`) is
    /// always excluded.
    pub fn watch_configuration(
        &self,
        base: &Path,
        template: &Path,
        data: Option<&Path>,
    ) -> WatchConfiguration {
        let mut inclusions: Vec<String> = [Some(template), data]
            .into_iter()
            .flatten()
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();
        inclusions.extend(self.watch.include.iter().cloned());

        let mut exclusions = self.watch.exclude.clone();
        let output_dir = self.output_dir(base);
        exclusions.push(format!(
            "{}/**",
            output_dir.to_string_lossy().trim_end_matches('/')
        ));

        let mut config = WatchConfiguration::new(template)
            .with_exclusions(exclusions)
            .with_inclusions(inclusions)
            .with_debounce_interval(self.debounce_interval());
        if let Some(data) = data {
            config = config.with_config_file(data);
        }
        config
    }
}
