//! Bounded parallel execution of compilation tasks
//!
//! A batch is drained by at most `max_workers` worker threads pulling from a
//! shared queue. Each task runs on its own thread so the worker can race it
//! against the task timeout; a task that misses its deadline is recorded as
//! a timeout and abandoned, not killed.

use std::cmp::Reverse;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::RecvTimeoutError;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::entities::{
    BuildError, BuildFailure, BuildResult, CompilationTask, ParallelCompilationResult,
    TaskOutcome,
};
use crate::domain::ports::TaskRunner;

use super::collector::ResultCollector;

/// Orchestrator-level timeout for tasks that carry none
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("concurrency must be at least 1 (got {0})")]
    InvalidConcurrency(usize),

    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}

#[derive(Debug, Clone, Copy)]
struct Limits {
    max_workers: usize,
    timeout: Duration,
}

/// Runs batches of tasks on a bounded worker pool
pub struct ParallelOrchestrator {
    runner: Arc<dyn TaskRunner>,
    limits: RwLock<Limits>,
}

impl ParallelOrchestrator {
    pub fn new(runner: Arc<dyn TaskRunner>) -> Self {
        let max_workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self {
            runner,
            limits: RwLock::new(Limits {
                max_workers,
                timeout: DEFAULT_TASK_TIMEOUT,
            }),
        }
    }

    pub fn configure_concurrency(&self, max_workers: usize) -> Result<(), OrchestratorError> {
        if max_workers == 0 {
            return Err(OrchestratorError::InvalidConcurrency(max_workers));
        }
        self.limits.write().max_workers = max_workers;
        Ok(())
    }

    pub fn configure_timeout(&self, timeout: Duration) -> Result<(), OrchestratorError> {
        if timeout.is_zero() {
            return Err(OrchestratorError::InvalidTimeout);
        }
        self.limits.write().timeout = timeout;
        Ok(())
    }

    pub fn max_workers(&self) -> usize {
        self.limits.read().max_workers
    }

    pub fn timeout(&self) -> Duration {
        self.limits.read().timeout
    }

    /// Run every task and wait for all of them to resolve.
    ///
    /// Higher-priority tasks are dispatched first. Completion order is not
    /// preserved in the result.
    pub fn execute_parallel(&self, tasks: Vec<CompilationTask>) -> ParallelCompilationResult {
        let Limits {
            max_workers,
            timeout,
        } = *self.limits.read();
        let submitted = tasks.len();
        if submitted == 0 {
            return ParallelCompilationResult::default();
        }

        let mut tasks = tasks;
        tasks.sort_by_key(|task| Reverse(task.priority()));

        let (queue_tx, queue_rx) = crossbeam_channel::unbounded();
        for task in tasks {
            // receiver is alive for the whole batch
            let _ = queue_tx.send(task);
        }
        drop(queue_tx);

        let workers = max_workers.min(submitted);
        let collector = ResultCollector::new();
        debug!(tasks = submitted, workers, "dispatching batch");

        let start = Instant::now();
        thread::scope(|scope| {
            for _ in 0..workers {
                let queue = queue_rx.clone();
                let collector = &collector;
                let runner = &self.runner;
                scope.spawn(move || {
                    for task in queue.iter() {
                        collector.record(run_with_timeout(runner, task, timeout));
                    }
                });
            }
        });
        let result = collector.finish(start.elapsed());

        info!(
            succeeded = result.success_count,
            failed = result.failure_count,
            duration_ms = result.total_duration.as_millis() as u64,
            "batch complete"
        );
        result
    }
}

/// Run one task on its own thread and wait at most its timeout
pub(crate) fn run_with_timeout(
    runner: &Arc<dyn TaskRunner>,
    task: CompilationTask,
    fallback: Duration,
) -> TaskOutcome {
    let timeout = task.effective_timeout(fallback);
    let template = task.template_file().to_path_buf();
    let (tx, rx) = crossbeam_channel::bounded(1);
    let runner = Arc::clone(runner);
    let start = Instant::now();

    let spawned = thread::Builder::new()
        .name("docwatch-build".to_string())
        .spawn(move || {
            let result = runner.run(&task);
            // nobody listens once the task timed out
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        return TaskOutcome::Failure(BuildFailure::new(
            template,
            BuildError::Aborted(format!("failed to start build thread: {}", e)),
            start.elapsed(),
        ));
    }

    match rx.recv_timeout(timeout) {
        Ok(Ok(output)) => {
            debug!(template = %template.display(), output = %output.display(), "task succeeded");
            TaskOutcome::Success(BuildResult::new(template, output, start.elapsed()))
        }
        Ok(Err(error)) => {
            warn!(template = %template.display(), error = %error, "task failed");
            TaskOutcome::Failure(BuildFailure::new(template, error, start.elapsed()))
        }
        Err(RecvTimeoutError::Timeout) => {
            warn!(
                template = %template.display(),
                timeout_ms = timeout.as_millis() as u64,
                "task timed out"
            );
            TaskOutcome::Failure(BuildFailure::new(
                template,
                BuildError::Timeout { after: timeout },
                start.elapsed(),
            ))
        }
        Err(RecvTimeoutError::Disconnected) => {
            warn!(template = %template.display(), "build thread exited without a result");
            TaskOutcome::Failure(BuildFailure::new(
                template,
                BuildError::Aborted("build thread exited without a result".to_string()),
                start.elapsed(),
            ))
        }
    }
}
