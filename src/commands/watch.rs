use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam_channel::RecvTimeoutError;
use docwatch::domain::ports::TaskRunner;
use docwatch::presentation::{factory, BuildReporter};
use docwatch::{BuildError, BuildFailure, BuildResult, CompilationTask, DocwatchError};
use tracing::warn;

use super::{load_project, reporter};

/// How often the main thread checks that the session is still alive
const LIVENESS_POLL: Duration = Duration::from_millis(500);

/// Reports every build it runs
struct ReportingRunner {
    inner: Arc<dyn TaskRunner>,
    reporter: Arc<dyn BuildReporter>,
}

impl TaskRunner for ReportingRunner {
    fn run(&self, task: &CompilationTask) -> Result<PathBuf, BuildError> {
        let start = Instant::now();
        match self.inner.run(task) {
            Ok(output) => {
                self.reporter.build_succeeded(&BuildResult::new(
                    task.template_file(),
                    output.clone(),
                    start.elapsed(),
                ));
                Ok(output)
            }
            Err(e) => {
                self.reporter.build_failed(&BuildFailure::new(
                    task.template_file(),
                    e.clone(),
                    start.elapsed(),
                ));
                Err(e)
            }
        }
    }
}

pub fn cmd_watch(
    config_path: Option<&Path>,
    template: &Path,
    data: Option<&Path>,
    json: bool,
) -> Result<ExitCode> {
    let project = load_project(config_path)?;

    let template = project.resolve(template);
    if !template.is_file() {
        return Err(DocwatchError::TemplateNotFound { path: template }.into());
    }
    let data = data.map(|d| project.resolve(d));

    let reporter: Arc<dyn BuildReporter> = Arc::from(reporter(json));
    let build: Arc<dyn TaskRunner> = Arc::new(factory::create_template_build(
        &project.config,
        &project.root,
    ));

    let mut task = CompilationTask::new(&template);
    if let Some(data) = &data {
        task = task.with_config(data);
    }

    // initial build under the batch timeout; failures are reported and
    // watching continues
    let initial = factory::create_orchestrator(&project.config, Arc::clone(&build))?
        .execute_parallel(vec![task.clone()]);
    for success in &initial.successes {
        reporter.build_succeeded(success);
    }
    for failure in &initial.failures {
        reporter.build_failed(failure);
    }

    let runner: Arc<dyn TaskRunner> = Arc::new(ReportingRunner {
        inner: build,
        reporter: Arc::clone(&reporter),
    });

    let watch_config =
        project
            .config
            .watch_configuration(&project.root, &template, data.as_deref());
    let debounce = watch_config.debounce_interval;
    let engine = factory::create_watch_engine(&project.config, runner, task);
    engine
        .start_watching(watch_config)
        .map_err(DocwatchError::from)?;
    reporter.watch_started(&template, debounce);

    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })
    .context("failed to install Ctrl+C handler")?;

    loop {
        match stop_rx.recv_timeout(LIVENESS_POLL) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                if !engine.is_watching() {
                    warn!("notification source closed");
                    break;
                }
            }
        }
    }

    engine.stop_watching();
    reporter.watch_stopped();
    Ok(ExitCode::SUCCESS)
}
