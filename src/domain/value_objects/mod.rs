//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod watch_configuration;

pub use watch_configuration::{WatchConfiguration, DEFAULT_DEBOUNCE_MS};
