use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use docwatch::config::CONFIG_FILE_NAME;
use docwatch::presentation::factory;
use docwatch::{CompilationTask, DocwatchError};
use tracing::info;

use super::{load_project, reporter};

pub fn cmd_build(
    config_path: Option<&Path>,
    template: Option<&Path>,
    data: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let project = load_project(config_path)?;

    let tasks = match template {
        Some(template) => {
            let mut task = CompilationTask::new(project.resolve(template));
            if let Some(data) = data {
                task = task.with_config(project.resolve(data));
            }
            vec![task]
        }
        None => project.config.tasks(&project.root),
    };
    if tasks.is_empty() {
        let config = config_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
        return Err(DocwatchError::NoTemplates { config }.into());
    }

    let runner = Arc::new(factory::create_template_build(&project.config, &project.root));
    let orchestrator = factory::create_orchestrator(&project.config, runner)?;
    info!(
        tasks = tasks.len(),
        workers = orchestrator.max_workers(),
        "starting build"
    );

    let result = orchestrator.execute_parallel(tasks);

    let reporter = reporter(json);
    for success in &result.successes {
        reporter.build_succeeded(success);
    }
    for failure in &result.failures {
        reporter.build_failed(failure);
    }
    reporter.batch_finished(&result);

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
