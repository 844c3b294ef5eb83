//! Watch engine
//!
//! Owns one notification subscription per session and a dedicated run-loop
//! thread that filters, debounces and dispatches changes:
//!
//! ```text
//! raw notification -> FileChangeEvent -> PatternMatcher -> DebounceStrategy
//!                  -> ChangeProcessor::can_process -> ChangeProcessor::process_change
//! ```
//!
//! Rebuild failures and source errors are logged; only `stop_watching` or
//! closure of the source ends a session. Each rebuild runs on its own thread
//! so a stop request is honoured while it is in progress; the rebuild is
//! then abandoned, not killed.

use std::collections::BTreeSet;
use std::ops::ControlFlow;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{select, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info, trace, warn};

use crate::domain::entities::{ChangeOperation, FileChangeEvent};
use crate::domain::ports::ChangeProcessor;
use crate::domain::services::{
    DebounceStrategy, GlobPatternMatcher, PatternError, PatternMatcher, TimeWindowDebounce,
};
use crate::domain::value_objects::{WatchConfiguration, DEFAULT_DEBOUNCE_MS};

use super::source::{NotificationSource, RawNotification, SourceError, Subscription, WatchHandle};

/// Errors surfaced synchronously by the engine's control methods
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("a watch session is already active\n  → Fix: Stop the current session before starting another")]
    AlreadyWatching,

    #[error("watch target not found: {path}")]
    MissingTarget { path: PathBuf },

    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    #[error("failed to open notification source: {0}")]
    Source(#[from] SourceError),

    #[error("failed to watch directory {dir}: {message}")]
    Register { dir: PathBuf, message: String },

    #[error("failed to start watch thread: {0}")]
    Spawn(String),
}

/// Configuration shared with the run loop
struct Settings {
    config: Option<WatchConfiguration>,
    matcher: Arc<GlobPatternMatcher>,
}

struct WatchSession {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl WatchSession {
    fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    fn shutdown(self) {
        // the loop may already be gone if the source closed
        let _ = self.stop.send(());
        if self.thread.join().is_err() {
            warn!("watch loop terminated abnormally");
        }
    }
}

/// Watches a template and its data file and rebuilds on change
pub struct WatchEngine {
    source: Arc<dyn NotificationSource>,
    processor: Arc<dyn ChangeProcessor>,
    debounce: Arc<dyn DebounceStrategy>,
    settings: Arc<RwLock<Settings>>,
    session: Mutex<Option<WatchSession>>,
}

impl WatchEngine {
    pub fn new(source: Arc<dyn NotificationSource>, processor: Arc<dyn ChangeProcessor>) -> Self {
        Self {
            source,
            processor,
            debounce: Arc::new(TimeWindowDebounce::new(Duration::from_millis(
                DEFAULT_DEBOUNCE_MS,
            ))),
            settings: Arc::new(RwLock::new(Settings {
                config: None,
                matcher: Arc::new(GlobPatternMatcher::default()),
            })),
            session: Mutex::new(None),
        }
    }

    /// Replace the default time-window debounce
    pub fn with_debounce(mut self, debounce: Arc<dyn DebounceStrategy>) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start a watch session.
    ///
    /// Fails with [`WatchError::AlreadyWatching`] while a session is live.
    /// If any directory cannot be registered the subscription is released
    /// and the engine stays stopped.
    pub fn start_watching(&self, config: WatchConfiguration) -> Result<(), WatchError> {
        let mut session = self.session.lock();
        if session.as_ref().is_some_and(WatchSession::is_running) {
            return Err(WatchError::AlreadyWatching);
        }
        // reap a session whose source closed on its own
        if let Some(finished) = session.take() {
            finished.shutdown();
        }

        for file in config.watched_files() {
            if !file.is_file() {
                return Err(WatchError::MissingTarget {
                    path: file.to_path_buf(),
                });
            }
        }
        let matcher = GlobPatternMatcher::new(&config.exclusion_patterns, &config.inclusion_patterns)?;
        let (exclusions, inclusions) = (matcher.exclusion_count(), matcher.inclusion_count());
        let directories = resolve_directories(&config)?;

        let Subscription {
            mut handle,
            events,
            errors,
        } = self.source.open()?;
        for dir in &directories {
            if let Err(e) = handle.register(dir) {
                drop(handle);
                return Err(WatchError::Register {
                    dir: dir.clone(),
                    message: e.message,
                });
            }
        }

        self.debounce.reset();
        self.debounce.configure_interval(config.debounce_interval);
        {
            let mut settings = self.settings.write();
            settings.matcher = Arc::new(matcher);
            settings.config = Some(config.clone());
        }

        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let run_loop = RunLoop {
            settings: Arc::clone(&self.settings),
            debounce: Arc::clone(&self.debounce),
            processor: Arc::clone(&self.processor),
            events,
            errors,
            stop: stop_rx,
            _handle: handle,
        };
        let thread = thread::Builder::new()
            .name("docwatch-watch".to_string())
            .spawn(move || run_loop.run())
            .map_err(|e| WatchError::Spawn(e.to_string()))?;

        info!(
            template = %config.template_file.display(),
            directories = directories.len(),
            exclusions,
            inclusions,
            debounce_ms = config.debounce_interval.as_millis() as u64,
            "watch started"
        );
        *session = Some(WatchSession {
            stop: stop_tx,
            thread,
        });
        Ok(())
    }

    /// End the current session, if any. Safe to call at any time.
    pub fn stop_watching(&self) {
        // join outside the lock so `is_watching` never waits on the loop
        let session = self.session.lock().take();
        if let Some(session) = session {
            session.shutdown();
            info!("watch stopped");
        }
    }

    pub fn is_watching(&self) -> bool {
        self.session
            .lock()
            .as_ref()
            .is_some_and(WatchSession::is_running)
    }

    /// Swap in new exclusion rules.
    ///
    /// On an invalid pattern the previous rules stay in effect.
    pub fn configure_exclusions<S: AsRef<str>>(&self, patterns: &[S]) -> Result<(), WatchError> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        let mut settings = self.settings.write();
        let inclusions = settings
            .config
            .as_ref()
            .map(|c| c.inclusion_patterns.clone())
            .unwrap_or_default();
        let matcher = GlobPatternMatcher::new(&patterns, &inclusions)?;
        let exclusions = matcher.exclusion_count();

        settings.matcher = Arc::new(matcher);
        if let Some(config) = settings.config.as_mut() {
            config.exclusion_patterns = patterns;
        }
        debug!(exclusions, "exclusion patterns updated");
        Ok(())
    }

    pub fn configure_interval(&self, interval: Duration) {
        self.debounce.configure_interval(interval);
        if let Some(config) = self.settings.write().config.as_mut() {
            config.debounce_interval = interval;
        }
    }

    /// Snapshot of the active configuration
    pub fn configuration(&self) -> Option<WatchConfiguration> {
        self.settings.read().config.clone()
    }
}

impl Drop for WatchEngine {
    fn drop(&mut self) {
        self.stop_watching();
    }
}

/// Canonical parent directories of the watched files, deduplicated
fn resolve_directories(config: &WatchConfiguration) -> Result<Vec<PathBuf>, WatchError> {
    let mut dirs = BTreeSet::new();
    for dir in config.watch_directories() {
        let canonical = dir
            .canonicalize()
            .map_err(|_| WatchError::MissingTarget { path: dir.clone() })?;
        dirs.insert(canonical);
    }
    Ok(dirs.into_iter().collect())
}

/// State moved onto the watch thread
struct RunLoop {
    settings: Arc<RwLock<Settings>>,
    debounce: Arc<dyn DebounceStrategy>,
    processor: Arc<dyn ChangeProcessor>,
    events: Receiver<RawNotification>,
    errors: Receiver<SourceError>,
    stop: Receiver<()>,
    // dropped when the loop returns, closing the OS subscription
    _handle: Box<dyn WatchHandle>,
}

impl RunLoop {
    fn run(self) {
        loop {
            select! {
                recv(self.stop) -> _ => break,
                recv(self.events) -> msg => match msg {
                    Ok(raw) => {
                        if self.handle_notification(raw).is_break() {
                            break;
                        }
                    }
                    Err(_) => {
                        debug!("notification stream closed");
                        break;
                    }
                },
                recv(self.errors) -> msg => match msg {
                    Ok(err) => warn!(error = %err, "watch source error"),
                    Err(_) => {
                        debug!("error stream closed");
                        break;
                    }
                },
            }
        }
    }

    fn handle_notification(&self, raw: RawNotification) -> ControlFlow<()> {
        let Some(operation) = ChangeOperation::from_event_kind(&raw.kind) else {
            trace!(kind = ?raw.kind, "ignoring notification");
            return ControlFlow::Continue(());
        };
        let matcher = Arc::clone(&self.settings.read().matcher);
        for path in raw.paths {
            let event = FileChangeEvent::new(path, operation, raw.observed_at);
            self.dispatch(matcher.as_ref(), event)?;
        }
        ControlFlow::Continue(())
    }

    fn dispatch(&self, matcher: &dyn PatternMatcher, event: FileChangeEvent) -> ControlFlow<()> {
        let path = event.path();
        if matcher.should_exclude(path) || !matcher.should_include(path) {
            trace!(path = %path.display(), "filtered");
            return ControlFlow::Continue(());
        }
        if !self.debounce.should_trigger(&event) {
            debug!(path = %path.display(), "debounced");
            return ControlFlow::Continue(());
        }
        if !self.processor.can_process(&event) {
            debug!(path = %path.display(), operation = %event.operation(), "not processable");
            return ControlFlow::Continue(());
        }

        info!(path = %path.display(), operation = %event.operation(), "change detected");
        self.rebuild(event)
    }

    /// Run the processor on its own thread and wait for it or a stop request
    fn rebuild(&self, event: FileChangeEvent) -> ControlFlow<()> {
        let path = event.path().to_path_buf();
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        let processor = Arc::clone(&self.processor);
        let spawned = thread::Builder::new()
            .name("docwatch-rebuild".to_string())
            .spawn(move || {
                let outcome =
                    panic::catch_unwind(AssertUnwindSafe(|| processor.process_change(&event)));
                // nobody listens once the session stopped
                let _ = done_tx.send(outcome);
            });
        if let Err(e) = spawned {
            error!(path = %path.display(), error = %e, "failed to start rebuild thread");
            return ControlFlow::Continue(());
        }

        select! {
            recv(self.stop) -> _ => {
                warn!(path = %path.display(), "watch stopped during rebuild; rebuild abandoned");
                ControlFlow::Break(())
            }
            recv(done_rx) -> msg => {
                match msg {
                    Ok(Ok(Ok(()))) => {}
                    Ok(Ok(Err(e))) => error!(path = %path.display(), error = %e, "rebuild failed"),
                    Ok(Err(_)) | Err(_) => error!(path = %path.display(), "rebuild panicked"),
                }
                ControlFlow::Continue(())
            }
        }
    }
}
