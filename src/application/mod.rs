//! Application Layer
//!
//! Use cases that orchestrate builds.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain filtering or debounce rules (those are in Domain)
//! - Coordinates threads, channels and the build ports
//!
//! ## Use Cases
//!
//! - `TemplateBuild` - Read, render and compile one template
//! - `WatchEngine` - Rebuild on filesystem changes
//! - `ParallelOrchestrator` - Build many templates on a bounded worker pool

pub mod build;
pub mod parallel;
pub mod watch;

pub use build::{TemplateBuild, DEFAULT_ENGINE};
pub use parallel::{
    OrchestratorError, ParallelOrchestrator, ResultCollector, DEFAULT_TASK_TIMEOUT,
};
pub use watch::{
    NotificationSource, RawNotification, RebuildProcessor, SourceError, Subscription,
    WatchEngine, WatchError, WatchHandle,
};
