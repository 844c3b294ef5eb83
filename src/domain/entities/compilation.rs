//! Compilation entities
//!
//! A `CompilationTask` describes one build unit. Every task resolves to
//! exactly one `BuildResult` (success) or `BuildFailure` (classified error),
//! and a parallel batch folds those into a `ParallelCompilationResult`.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// One template build, immutable once submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationTask {
    template_file: PathBuf,
    config_file: Option<PathBuf>,
    priority: i32,
    timeout: Option<Duration>,
}

impl CompilationTask {
    pub fn new(template_file: impl Into<PathBuf>) -> Self {
        Self {
            template_file: template_file.into(),
            config_file: None,
            priority: 0,
            timeout: None,
        }
    }

    /// Attach the data file the template is rendered with
    pub fn with_config(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Per-task timeout; unset falls back to the orchestrator default
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn template_file(&self) -> &Path {
        &self.template_file
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Timeout to enforce, given the orchestrator-level fallback.
    /// A zero timeout counts as unset.
    pub fn effective_timeout(&self, fallback: Duration) -> Duration {
        self.timeout
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or(fallback)
    }
}

/// Classified cause of a failed build
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The task did not finish within its timeout
    #[error("timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },

    /// The template (or its data file) could not be read or rendered
    #[error("template error in {path}: {message}")]
    Template { path: PathBuf, message: String },

    /// The engine ran and reported failure
    #[error("compilation failed: {0}")]
    Compilation(String),

    /// The build stopped without reporting a result
    #[error("build aborted: {0}")]
    Aborted(String),
}

impl BuildError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Short machine-readable tag for output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::Template { .. } => "template",
            Self::Compilation(_) => "compilation",
            Self::Aborted(_) => "aborted",
        }
    }
}

/// A successful build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub template_file: PathBuf,
    pub output_path: PathBuf,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
}

impl BuildResult {
    pub fn new(template_file: impl Into<PathBuf>, output_path: PathBuf, duration: Duration) -> Self {
        Self {
            template_file: template_file.into(),
            output_path,
            duration,
            timestamp: Utc::now(),
        }
    }
}

/// A failed build
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
    pub template_file: PathBuf,
    pub error: BuildError,
    pub duration: Duration,
    pub timestamp: DateTime<Utc>,
}

impl BuildFailure {
    pub fn new(template_file: impl Into<PathBuf>, error: BuildError, duration: Duration) -> Self {
        Self {
            template_file: template_file.into(),
            error,
            duration,
            timestamp: Utc::now(),
        }
    }
}

/// Outcome of a single task
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Success(BuildResult),
    Failure(BuildFailure),
}

/// Aggregated outcome of a parallel batch
#[derive(Debug, Clone, Default)]
pub struct ParallelCompilationResult {
    pub successes: Vec<BuildResult>,
    pub failures: Vec<BuildFailure>,
    pub total_duration: Duration,
    pub success_count: usize,
    pub failure_count: usize,
}

impl ParallelCompilationResult {
    pub fn new(
        successes: Vec<BuildResult>,
        failures: Vec<BuildFailure>,
        total_duration: Duration,
    ) -> Self {
        Self {
            success_count: successes.len(),
            failure_count: failures.len(),
            successes,
            failures,
            total_duration,
        }
    }

    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }

    pub fn is_success(&self) -> bool {
        self.failure_count == 0
    }

    pub fn timeout_count(&self) -> usize {
        self.failures.iter().filter(|f| f.error.is_timeout()).count()
    }
}
