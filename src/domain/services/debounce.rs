//! Leading-edge debouncing of change events
//!
//! The first event after a quiet period fires immediately. Events arriving
//! within the window after an accepted trigger are dropped; nothing is
//! deferred and no trailing trigger is emitted when the window closes.

use parking_lot::Mutex;
use std::time::{Duration, Instant};

use crate::domain::entities::FileChangeEvent;

/// Gate that suppresses bursts of change notifications
pub trait DebounceStrategy: Send + Sync {
    /// Returns true and starts a new window if the event falls outside the
    /// current one. Returns false otherwise, leaving the state untouched.
    fn should_trigger(&self, event: &FileChangeEvent) -> bool;

    /// Forget the last trigger so the next event always fires
    fn reset(&self);

    /// Replace the window length
    fn configure_interval(&self, interval: Duration);

    fn interval(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
struct DebounceState {
    interval: Duration,
    last_trigger: Option<Instant>,
}

/// Time-window debounce keyed on the instant each event was observed
#[derive(Debug)]
pub struct TimeWindowDebounce {
    state: Mutex<DebounceState>,
}

impl TimeWindowDebounce {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: Mutex::new(DebounceState {
                interval,
                last_trigger: None,
            }),
        }
    }

    /// Gate a trigger request observed at `now`
    pub fn should_trigger_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock();
        let open = match state.last_trigger {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= state.interval,
        };
        if open {
            state.last_trigger = Some(now);
        }
        open
    }
}

impl DebounceStrategy for TimeWindowDebounce {
    fn should_trigger(&self, event: &FileChangeEvent) -> bool {
        self.should_trigger_at(event.observed_at())
    }

    fn reset(&self) {
        self.state.lock().last_trigger = None;
    }

    fn configure_interval(&self, interval: Duration) {
        self.state.lock().interval = interval;
    }

    fn interval(&self) -> Duration {
        self.state.lock().interval
    }
}
