//! `notify`-backed notification source
//!
//! Bridges the `notify` callback into the two crossbeam streams the watch
//! engine consumes. Dropping the handle drops the OS watcher, which drops the
//! callback and with it both senders.

use std::path::Path;

use crossbeam_channel::unbounded;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::watch::{
    NotificationSource, RawNotification, SourceError, Subscription, WatchHandle,
};

/// The platform's recommended watcher
#[derive(Debug, Clone, Default)]
pub struct NotifySource {
    config: Config,
}

impl NotifySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom `notify` configuration (e.g. polling interval)
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }
}

impl NotificationSource for NotifySource {
    fn open(&self) -> Result<Subscription, SourceError> {
        let (event_tx, event_rx) = unbounded();
        let (error_tx, error_rx) = unbounded();

        let watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                // receivers go away with the run loop; late events are dropped
                match res {
                    Ok(event) => {
                        let _ = event_tx.send(RawNotification::new(event.kind, event.paths));
                    }
                    Err(e) => {
                        let _ = error_tx.send(SourceError::new(e.to_string()));
                    }
                }
            },
            self.config,
        )
        .map_err(|e| SourceError::new(e.to_string()))?;

        Ok(Subscription {
            handle: Box::new(NotifyHandle { watcher }),
            events: event_rx,
            errors: error_rx,
        })
    }
}

struct NotifyHandle {
    watcher: RecommendedWatcher,
}

impl WatchHandle for NotifyHandle {
    fn register(&mut self, dir: &Path) -> Result<(), SourceError> {
        self.watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| SourceError::new(e.to_string()))
    }
}
