//! ChangeProcessor port
//!
//! Receives change events that survived filtering and debouncing.

use crate::domain::entities::{BuildError, FileChangeEvent};

pub trait ChangeProcessor: Send + Sync {
    /// Whether this processor handles the event at all
    fn can_process(&self, event: &FileChangeEvent) -> bool;

    /// React to the change, typically by rebuilding.
    ///
    /// Failures are reported to the caller, which logs them and keeps
    /// watching.
    fn process_change(&self, event: &FileChangeEvent) -> Result<(), BuildError>;
}
