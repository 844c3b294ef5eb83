//! Domain Entities
//!
//! - `FileChangeEvent` - One observed change to a watched path
//! - `CompilationTask` - One template build unit
//! - `BuildResult` / `BuildFailure` - Outcome of one task
//! - `ParallelCompilationResult` - Aggregated outcome of a batch

mod change_event;
mod compilation;

pub use change_event::{ChangeOperation, FileChangeEvent};
pub use compilation::{
    BuildError, BuildFailure, BuildResult, CompilationTask, ParallelCompilationResult,
    TaskOutcome,
};
