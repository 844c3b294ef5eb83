//! Single template build
//!
//! `TemplateBuild` is the `TaskRunner` used by both the watch loop and the
//! parallel orchestrator: read template, render with its data file, compile.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use crate::domain::entities::{BuildError, CompilationTask};
use crate::domain::ports::{Compiler, TaskRunner, TemplateRenderer};

/// Default PDF engine
pub const DEFAULT_ENGINE: &str = "pdflatex";

/// Builds templates into `output_dir` with a fixed engine
#[derive(Clone)]
pub struct TemplateBuild {
    compiler: Arc<dyn Compiler>,
    renderer: Arc<dyn TemplateRenderer>,
    engine: String,
    output_dir: PathBuf,
}

impl TemplateBuild {
    pub fn new(
        compiler: Arc<dyn Compiler>,
        renderer: Arc<dyn TemplateRenderer>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            compiler,
            renderer,
            engine: DEFAULT_ENGINE.to_string(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Where the artifact for `template` is written
    pub fn output_path_for(&self, template: &Path) -> PathBuf {
        let stem = template
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        self.output_dir.join(format!("{}.pdf", stem))
    }
}

impl TaskRunner for TemplateBuild {
    fn run(&self, task: &CompilationTask) -> Result<PathBuf, BuildError> {
        let start = Instant::now();
        let template_path = task.template_file();

        let template = fs::read_to_string(template_path).map_err(|e| BuildError::Template {
            path: template_path.to_path_buf(),
            message: e.to_string(),
        })?;

        let content = self
            .renderer
            .render(&template, task.config_file())
            .map_err(|e| BuildError::Template {
                path: task
                    .config_file()
                    .unwrap_or(template_path)
                    .to_path_buf(),
                message: e.to_string(),
            })?;

        let output_path = self.output_path_for(template_path);
        let produced = self
            .compiler
            .compile(&content, &self.engine, &output_path)
            .map_err(|e| BuildError::Compilation(e.message))?;

        debug!(
            template = %template_path.display(),
            output = %produced.display(),
            engine = %self.engine,
            duration_ms = start.elapsed().as_millis() as u64,
            "template built"
        );
        Ok(produced)
    }
}
