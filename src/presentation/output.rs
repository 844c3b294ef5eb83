//! Output Rendering
//!
//! Build results go to stdout, either as human-readable lines or as one
//! NDJSON object per event under `--json`.

use std::path::Path;
use std::time::Duration;

use serde_json::{json, Value};

use crate::domain::entities::{BuildFailure, BuildResult, ParallelCompilationResult};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// NDJSON for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    eye: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            eye: "◉",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            eye: "[WATCH]",
        }
    }
}

/// Receives build and watch events as they happen
pub trait BuildReporter: Send + Sync {
    fn build_succeeded(&self, result: &BuildResult);
    fn build_failed(&self, failure: &BuildFailure);
    fn batch_finished(&self, result: &ParallelCompilationResult);
    fn watch_started(&self, template: &Path, debounce: Duration);
    fn watch_stopped(&self);
}

/// Text reporter
pub struct TextReporter {
    /// Whether to use unicode
    pub unicode: bool,
}

impl TextReporter {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    fn success_line(&self, result: &BuildResult) -> String {
        format!(
            "{} {} → {} ({})",
            self.icons().check,
            result.template_file.display(),
            result.output_path.display(),
            format_duration(result.duration)
        )
    }

    fn failure_line(&self, failure: &BuildFailure) -> String {
        format!(
            "{} {}: {} ({})",
            self.icons().cross,
            failure.template_file.display(),
            failure.error,
            format_duration(failure.duration)
        )
    }

    fn summary_line(&self, result: &ParallelCompilationResult) -> String {
        let icon = if result.is_success() {
            self.icons().check
        } else {
            self.icons().cross
        };
        let mut line = format!(
            "{} {} succeeded, {} failed",
            icon, result.success_count, result.failure_count
        );
        let timeouts = result.timeout_count();
        if timeouts > 0 {
            line.push_str(&format!(" ({} timed out)", timeouts));
        }
        line.push_str(&format!(" in {}", format_duration(result.total_duration)));
        line
    }
}

impl BuildReporter for TextReporter {
    fn build_succeeded(&self, result: &BuildResult) {
        println!("{}", self.success_line(result));
    }

    fn build_failed(&self, failure: &BuildFailure) {
        println!("{}", self.failure_line(failure));
    }

    fn batch_finished(&self, result: &ParallelCompilationResult) {
        println!();
        println!("{}", self.summary_line(result));
    }

    fn watch_started(&self, template: &Path, debounce: Duration) {
        println!(
            "{} Watching {} (debounce {}). Press Ctrl+C to stop.",
            self.icons().eye,
            template.display(),
            format_duration(debounce)
        );
    }

    fn watch_stopped(&self) {
        println!("Stopped watching.");
    }
}

/// NDJSON reporter
pub struct JsonReporter;

impl JsonReporter {
    fn emit(value: Value) {
        println!("{}", value);
    }
}

impl BuildReporter for JsonReporter {
    fn build_succeeded(&self, result: &BuildResult) {
        Self::emit(success_event(result));
    }

    fn build_failed(&self, failure: &BuildFailure) {
        Self::emit(failure_event(failure));
    }

    fn batch_finished(&self, result: &ParallelCompilationResult) {
        Self::emit(summary_event(result));
    }

    fn watch_started(&self, template: &Path, debounce: Duration) {
        Self::emit(json!({
            "event": "watch_started",
            "template": template.display().to_string(),
            "debounce_ms": debounce.as_millis() as u64,
        }));
    }

    fn watch_stopped(&self) {
        Self::emit(json!({ "event": "watch_stopped" }));
    }
}

pub fn success_event(result: &BuildResult) -> Value {
    json!({
        "event": "build_succeeded",
        "template": result.template_file.display().to_string(),
        "output": result.output_path.display().to_string(),
        "duration_ms": result.duration.as_millis() as u64,
        "timestamp": result.timestamp.to_rfc3339(),
    })
}

pub fn failure_event(failure: &BuildFailure) -> Value {
    json!({
        "event": "build_failed",
        "template": failure.template_file.display().to_string(),
        "kind": failure.error.kind(),
        "error": failure.error.to_string(),
        "duration_ms": failure.duration.as_millis() as u64,
        "timestamp": failure.timestamp.to_rfc3339(),
    })
}

pub fn summary_event(result: &ParallelCompilationResult) -> Value {
    json!({
        "event": "batch_complete",
        "success": result.is_success(),
        "success_count": result.success_count,
        "failure_count": result.failure_count,
        "timeout_count": result.timeout_count(),
        "total_duration_ms": result.total_duration.as_millis() as u64,
    })
}

/// `850ms`, `1.25s`
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Create a reporter based on format
pub fn create_reporter(format: OutputFormat, unicode: bool) -> Box<dyn BuildReporter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter { unicode }),
        OutputFormat::Json => Box::new(JsonReporter),
    }
}
