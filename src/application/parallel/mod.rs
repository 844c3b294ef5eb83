//! Parallel Build Use Case
//!
//! Multi-template batches:
//! - `ParallelOrchestrator` - Bounded worker pool with per-task timeouts
//! - `ResultCollector` - Lock-protected aggregation of task outcomes

mod collector;
mod orchestrator;

#[cfg(test)]
mod tests;

pub use collector::ResultCollector;
pub use orchestrator::{OrchestratorError, ParallelOrchestrator, DEFAULT_TASK_TIMEOUT};
pub(crate) use orchestrator::run_with_timeout;
