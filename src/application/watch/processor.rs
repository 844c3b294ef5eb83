//! Rebuild-on-change processor

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::application::parallel::{run_with_timeout, DEFAULT_TASK_TIMEOUT};
use crate::domain::entities::{
    BuildError, ChangeOperation, CompilationTask, FileChangeEvent, TaskOutcome,
};
use crate::domain::ports::{ChangeProcessor, TaskRunner};

/// Rebuilds one task whenever a relevant change arrives.
///
/// Each rebuild is bounded by the task's own timeout, else the processor's.
pub struct RebuildProcessor {
    runner: Arc<dyn TaskRunner>,
    task: CompilationTask,
    timeout: Duration,
}

impl RebuildProcessor {
    pub fn new(runner: Arc<dyn TaskRunner>, task: CompilationTask) -> Self {
        Self {
            runner,
            task,
            timeout: DEFAULT_TASK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl ChangeProcessor for RebuildProcessor {
    fn can_process(&self, event: &FileChangeEvent) -> bool {
        matches!(
            event.operation(),
            ChangeOperation::Create | ChangeOperation::Write | ChangeOperation::Rename
        )
    }

    fn process_change(&self, event: &FileChangeEvent) -> Result<(), BuildError> {
        match run_with_timeout(&self.runner, self.task.clone(), self.timeout) {
            TaskOutcome::Success(result) => {
                info!(
                    trigger = %event.path().display(),
                    template = %result.template_file.display(),
                    output = %result.output_path.display(),
                    duration_ms = result.duration.as_millis() as u64,
                    "rebuild complete"
                );
                Ok(())
            }
            TaskOutcome::Failure(failure) => Err(failure.error),
        }
    }
}
