//! Domain Services
//!
//! Thread-safe building blocks of the watch pipeline.
//! Neither service performs I/O.

mod debounce;
mod pattern_matcher;

pub use debounce::{DebounceStrategy, TimeWindowDebounce};
pub use pattern_matcher::{GlobPatternMatcher, PatternError, PatternMatcher};
