//! Tests for the parallel module

use super::orchestrator::{OrchestratorError, ParallelOrchestrator};
use crate::domain::entities::{BuildError, CompilationTask};
use crate::domain::ports::TaskRunner;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Runner whose behaviour is chosen by the template name prefix:
/// `slow-` sleeps two seconds, `fail-` errors, `panic-` panics.
/// Everything else sleeps `delay` and succeeds.
struct ScriptedRunner {
    delay: Duration,
    active: AtomicUsize,
    peak: AtomicUsize,
    started: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            active: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
        })
    }

    fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl TaskRunner for ScriptedRunner {
    fn run(&self, task: &CompilationTask) -> Result<PathBuf, BuildError> {
        let name = task
            .template_file()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.started.lock().unwrap().push(name.clone());

        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now_active, Ordering::SeqCst);

        let outcome = if name.starts_with("slow-") {
            std::thread::sleep(Duration::from_secs(2));
            Ok(task.template_file().with_extension("pdf"))
        } else if name.starts_with("fail-") {
            Err(BuildError::Compilation(format!("{} failed", name)))
        } else if name.starts_with("panic-") {
            self.active.fetch_sub(1, Ordering::SeqCst);
            panic!("engine crashed on {}", name);
        } else {
            std::thread::sleep(self.delay);
            Ok(task.template_file().with_extension("pdf"))
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

fn tasks(names: &[&str]) -> Vec<CompilationTask> {
    names
        .iter()
        .map(|n| CompilationTask::new(format!("{}.tex", n)))
        .collect()
}

fn numbered(count: usize) -> Vec<CompilationTask> {
    (0..count)
        .map(|i| CompilationTask::new(format!("doc{}.tex", i)))
        .collect()
}

// === Configuration ===

#[test]
fn defaults_are_sane() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
    assert!(orchestrator.max_workers() >= 1);
    assert_eq!(orchestrator.timeout(), Duration::from_secs(300));
}

#[test]
fn zero_concurrency_is_rejected() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
    orchestrator.configure_concurrency(4).unwrap();

    assert_eq!(
        orchestrator.configure_concurrency(0),
        Err(OrchestratorError::InvalidConcurrency(0))
    );
    assert_eq!(orchestrator.max_workers(), 4);
}

#[test]
fn zero_timeout_is_rejected() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
    assert_eq!(
        orchestrator.configure_timeout(Duration::ZERO),
        Err(OrchestratorError::InvalidTimeout)
    );
    orchestrator
        .configure_timeout(Duration::from_secs(9))
        .unwrap();
    assert_eq!(orchestrator.timeout(), Duration::from_secs(9));
}

// === Execution ===

#[test]
fn empty_batch_returns_empty_result() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
    let result = orchestrator.execute_parallel(Vec::new());
    assert_eq!(result.total(), 0);
    assert_eq!(result.total_duration, Duration::ZERO);
}

#[test]
fn never_exceeds_concurrency_limit() {
    let runner = ScriptedRunner::new(Duration::from_millis(20));
    let orchestrator = ParallelOrchestrator::new(runner.clone());
    orchestrator.configure_concurrency(3).unwrap();

    let result = orchestrator.execute_parallel(numbered(12));

    assert_eq!(result.success_count + result.failure_count, 12);
    assert!(runner.peak() <= 3, "peak concurrency was {}", runner.peak());
    assert!(runner.peak() >= 1);
}

#[test]
fn five_tasks_two_workers_run_in_three_rounds() {
    let runner = ScriptedRunner::new(Duration::from_millis(40));
    let orchestrator = ParallelOrchestrator::new(runner);
    orchestrator.configure_concurrency(2).unwrap();

    let result = orchestrator.execute_parallel(numbered(5));

    assert_eq!(result.success_count, 5);
    assert_eq!(result.failure_count, 0);
    assert!(
        result.total_duration >= Duration::from_millis(120),
        "finished too fast: {:?}",
        result.total_duration
    );
    assert!(
        result.total_duration < Duration::from_millis(200),
        "ran sequentially: {:?}",
        result.total_duration
    );
}

#[test]
fn every_task_resolves_exactly_once() {
    for count in 0..10 {
        for workers in 1..4 {
            let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
            orchestrator.configure_concurrency(workers).unwrap();

            let mut batch = numbered(count);
            if count > 2 {
                batch.push(CompilationTask::new("fail-extra.tex"));
            }
            let submitted = batch.len();
            let result = orchestrator.execute_parallel(batch);

            assert_eq!(result.total(), submitted);
            let mut seen: HashSet<PathBuf> = HashSet::new();
            for path in result
                .successes
                .iter()
                .map(|s| &s.template_file)
                .chain(result.failures.iter().map(|f| &f.template_file))
            {
                assert!(seen.insert(path.clone()), "{} resolved twice", path.display());
            }
        }
    }
}

#[test]
fn failures_do_not_abort_the_batch() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::from_millis(5)));
    orchestrator.configure_concurrency(2).unwrap();

    let result = orchestrator.execute_parallel(tasks(&["a", "fail-b", "c", "fail-d"]));

    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 2);
    for failure in &result.failures {
        assert_eq!(failure.error.kind(), "compilation");
    }
}

#[test]
fn task_timeout_is_classified_and_does_not_block() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::from_millis(5)));
    orchestrator.configure_concurrency(2).unwrap();

    let mut batch = tasks(&["a", "b"]);
    batch.push(CompilationTask::new("slow-c.tex").with_timeout(Duration::from_millis(100)));

    let start = Instant::now();
    let result = orchestrator.execute_parallel(batch);

    assert!(start.elapsed() < Duration::from_millis(1500));
    assert_eq!(result.success_count, 2);
    assert_eq!(result.failure_count, 1);
    assert_eq!(result.timeout_count(), 1);
    assert_eq!(
        result.failures[0].error,
        BuildError::Timeout {
            after: Duration::from_millis(100)
        }
    );
}

#[test]
fn task_without_timeout_uses_orchestrator_default() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
    orchestrator
        .configure_timeout(Duration::from_millis(80))
        .unwrap();

    let start = Instant::now();
    let result = orchestrator.execute_parallel(tasks(&["slow-a"]));

    assert!(start.elapsed() < Duration::from_millis(1500));
    assert_eq!(result.timeout_count(), 1);
}

#[test]
fn own_timeout_overrides_default() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::from_millis(150)));
    orchestrator
        .configure_timeout(Duration::from_millis(50))
        .unwrap();

    let result = orchestrator.execute_parallel(vec![
        CompilationTask::new("patient.tex").with_timeout(Duration::from_secs(5)),
    ]);

    assert_eq!(result.success_count, 1);
}

#[test]
fn zero_task_timeout_falls_back_to_default() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::from_millis(5)));

    let result = orchestrator
        .execute_parallel(vec![CompilationTask::new("a.tex").with_timeout(Duration::ZERO)]);

    assert_eq!(result.success_count, 1);
    assert_eq!(result.failure_count, 0);
}

#[test]
fn panicking_task_is_aborted_failure() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));

    let result = orchestrator.execute_parallel(tasks(&["ok", "panic-b"]));

    assert_eq!(result.success_count, 1);
    assert_eq!(result.failure_count, 1);
    assert_eq!(result.failures[0].error.kind(), "aborted");
}

#[test]
fn higher_priority_dispatched_first() {
    let runner = ScriptedRunner::new(Duration::ZERO);
    let orchestrator = ParallelOrchestrator::new(runner.clone());
    orchestrator.configure_concurrency(1).unwrap();

    orchestrator.execute_parallel(vec![
        CompilationTask::new("low.tex").with_priority(-1),
        CompilationTask::new("mid-a.tex"),
        CompilationTask::new("high.tex").with_priority(10),
        CompilationTask::new("mid-b.tex"),
    ]);

    let started = runner.started.lock().unwrap().clone();
    assert_eq!(started, vec!["high", "mid-a", "mid-b", "low"]);
}

#[test]
fn output_paths_are_reported() {
    let orchestrator = ParallelOrchestrator::new(ScriptedRunner::new(Duration::ZERO));
    let result = orchestrator.execute_parallel(tasks(&["letter"]));
    assert_eq!(result.successes[0].output_path, PathBuf::from("letter.pdf"));
    assert_eq!(result.successes[0].template_file, PathBuf::from("letter.tex"));
}
