//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::Path;
use std::sync::Arc;

use crate::application::{ParallelOrchestrator, RebuildProcessor, TemplateBuild, WatchEngine};
use crate::config::Config;
use crate::domain::entities::CompilationTask;
use crate::domain::ports::TaskRunner;
use crate::error::DocwatchResult;
use crate::infrastructure::{NotifySource, ProcessCompiler, TomlTemplateRenderer};

/// Create the template build runner for `config`
///
/// The output directory is resolved against `base`.
pub fn create_template_build(config: &Config, base: &Path) -> TemplateBuild {
    TemplateBuild::new(
        Arc::new(ProcessCompiler::new()),
        Arc::new(TomlTemplateRenderer::new()),
        config.output_dir(base),
    )
    .with_engine(config.build.engine.clone())
}

/// Create an orchestrator with the configured worker count and timeout
pub fn create_orchestrator(
    config: &Config,
    runner: Arc<dyn TaskRunner>,
) -> DocwatchResult<ParallelOrchestrator> {
    let orchestrator = ParallelOrchestrator::new(runner);
    if let Some(workers) = config.build.concurrency {
        orchestrator.configure_concurrency(workers)?;
    }
    orchestrator.configure_timeout(config.task_timeout())?;
    Ok(orchestrator)
}

/// Create a watch engine that rebuilds `task` through `runner`
///
/// Rebuilds are bounded by `[build] timeout_secs` unless the task sets its own.
pub fn create_watch_engine(
    config: &Config,
    runner: Arc<dyn TaskRunner>,
    task: CompilationTask,
) -> WatchEngine {
    let processor =
        Arc::new(RebuildProcessor::new(runner, task).with_timeout(config.task_timeout()));
    WatchEngine::new(Arc::new(NotifySource::new()), processor)
}
