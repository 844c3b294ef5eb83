//! Concurrent accumulation of task outcomes

use parking_lot::Mutex;
use std::time::Duration;

use crate::domain::entities::{
    BuildFailure, BuildResult, ParallelCompilationResult, TaskOutcome,
};

#[derive(Default)]
struct Collected {
    successes: Vec<BuildResult>,
    failures: Vec<BuildFailure>,
}

/// Append-only, lock-protected sink shared by all workers of a batch
#[derive(Default)]
pub struct ResultCollector {
    inner: Mutex<Collected>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: TaskOutcome) {
        let mut inner = self.inner.lock();
        match outcome {
            TaskOutcome::Success(result) => inner.successes.push(result),
            TaskOutcome::Failure(failure) => inner.failures.push(failure),
        }
    }

    /// Seal the collector into the batch result
    pub fn finish(self, total_duration: Duration) -> ParallelCompilationResult {
        let Collected {
            successes,
            failures,
        } = self.inner.into_inner();
        ParallelCompilationResult::new(successes, failures, total_duration)
    }
}
