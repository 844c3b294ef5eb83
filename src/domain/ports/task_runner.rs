//! TaskRunner port
//!
//! Executes one `CompilationTask` to completion on the calling thread.
//! Both the watch rebuild path and the parallel orchestrator go through it.

use std::path::PathBuf;

use crate::domain::entities::{BuildError, CompilationTask};

pub trait TaskRunner: Send + Sync {
    /// Build the task and return the produced artifact
    fn run(&self, task: &CompilationTask) -> Result<PathBuf, BuildError>;
}
