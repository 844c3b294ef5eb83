//! Notification source abstraction
//!
//! The watch engine consumes filesystem notifications through this seam so
//! the run loop can be driven by `notify` in production and by plain
//! channels in tests.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crossbeam_channel::Receiver;
use notify::EventKind;

/// A raw notification, before normalization
#[derive(Debug, Clone)]
pub struct RawNotification {
    pub kind: EventKind,
    pub paths: Vec<PathBuf>,
    /// When the source observed the change
    pub observed_at: Instant,
}

impl RawNotification {
    pub fn new(kind: EventKind, paths: Vec<PathBuf>) -> Self {
        Self {
            kind,
            paths,
            observed_at: Instant::now(),
        }
    }
}

/// Error reported on the source's error stream
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Live OS subscription. Dropping it releases the underlying handle and
/// closes both streams.
pub trait WatchHandle: Send {
    /// Start delivering events for `dir` (non-recursive)
    fn register(&mut self, dir: &Path) -> Result<(), SourceError>;
}

/// An open subscription: the handle plus its two streams
pub struct Subscription {
    pub handle: Box<dyn WatchHandle>,
    pub events: Receiver<RawNotification>,
    pub errors: Receiver<SourceError>,
}

/// Factory for subscriptions, one per watch session
pub trait NotificationSource: Send + Sync {
    fn open(&self) -> Result<Subscription, SourceError>;
}
