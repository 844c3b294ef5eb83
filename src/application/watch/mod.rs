//! Watch Use Case
//!
//! Continuous rebuilds driven by filesystem notifications:
//! - `WatchEngine` - Session lifecycle and the run loop
//! - `RebuildProcessor` - Rebuilds the watched template on change
//! - `NotificationSource` - Seam over the OS notification API
//!
//! ## Usage
//!
//! ```ignore
//! let engine = WatchEngine::new(Arc::new(NotifySource::new()), Arc::new(processor));
//! engine.start_watching(WatchConfiguration::new("cv.tex"))?;
//! // ...
//! engine.stop_watching();
//! ```

mod engine;
mod processor;
mod source;


pub use engine::{WatchEngine, WatchError};
pub use processor::RebuildProcessor;
pub use source::{
    NotificationSource, RawNotification, SourceError, Subscription, WatchHandle,
};
