//! FileChangeEvent entity - one observed change to a watched path
//!
//! Events are created by the watch run loop from raw notifications and are
//! never mutated afterwards.

use chrono::{DateTime, Utc};
use notify::event::{EventKind, ModifyKind};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Normalized kind of filesystem change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOperation {
    Create,
    Write,
    Remove,
    Rename,
    Chmod,
}

impl ChangeOperation {
    /// Map a raw `notify` event kind onto an operation tag.
    ///
    /// Access notifications and unclassified kinds carry no content change
    /// and map to `None`.
    pub fn from_event_kind(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Create),
            EventKind::Remove(_) => Some(Self::Remove),
            EventKind::Modify(ModifyKind::Name(_)) => Some(Self::Rename),
            EventKind::Modify(ModifyKind::Metadata(_)) => Some(Self::Chmod),
            EventKind::Modify(_) => Some(Self::Write),
            EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Write => "write",
            Self::Remove => "remove",
            Self::Rename => "rename",
            Self::Chmod => "chmod",
        }
    }
}

impl fmt::Display for ChangeOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single change to a single path
#[derive(Debug, Clone, PartialEq)]
pub struct FileChangeEvent {
    path: PathBuf,
    operation: ChangeOperation,
    /// Wall-clock time, for reporting
    timestamp: DateTime<Utc>,
    /// Monotonic time the notification source saw the change
    observed_at: Instant,
}

impl FileChangeEvent {
    pub fn new(path: impl Into<PathBuf>, operation: ChangeOperation, observed_at: Instant) -> Self {
        Self {
            path: path.into(),
            operation,
            timestamp: Utc::now(),
            observed_at,
        }
    }

    /// Create an event observed right now
    pub fn now(path: impl Into<PathBuf>, operation: ChangeOperation) -> Self {
        Self::new(path, operation, Instant::now())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn operation(&self) -> ChangeOperation {
        self.operation
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn observed_at(&self) -> Instant {
        self.observed_at
    }
}
