//! docwatch - template-to-PDF build tool
//!
//! docwatch renders document templates with a TOML data file, compiles them
//! with an external engine, rebuilds on change through a debounced watch loop,
//! and builds many templates at once on a bounded worker pool.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{ParallelOrchestrator, TemplateBuild, WatchEngine, WatchError};
pub use config::Config;
pub use domain::entities::{
    BuildError, BuildFailure, BuildResult, CompilationTask, FileChangeEvent,
    ParallelCompilationResult,
};
pub use domain::value_objects::WatchConfiguration;
pub use error::{DocwatchError, DocwatchResult};
