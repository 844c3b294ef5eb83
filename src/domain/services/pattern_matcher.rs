//! Path inclusion/exclusion rules
//!
//! Uses `globset` for glob matching. Exclusion always wins over inclusion.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use thiserror::Error;

/// Decides whether a changed path is relevant to a watch session.
///
/// Implementations are read-only after construction and shared between
/// threads.
pub trait PatternMatcher: Send + Sync {
    /// True if the path matches any exclusion rule
    fn should_exclude(&self, path: &Path) -> bool;

    /// True if the path is not excluded and passes the inclusion rules
    fn should_include(&self, path: &Path) -> bool;
}

/// A glob pattern that could not be compiled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid pattern '{pattern}': {message}")]
pub struct PatternError {
    pub pattern: String,
    pub message: String,
}

/// Glob-backed matcher.
///
/// Relative patterns also match at any depth, so `*.aux` and `build/**`
/// apply to absolute event paths. An empty inclusion set includes every
/// path that is not excluded.
#[derive(Debug, Clone)]
pub struct GlobPatternMatcher {
    exclude: GlobSet,
    include: GlobSet,
    exclude_count: usize,
    include_count: usize,
}

impl Default for GlobPatternMatcher {
    fn default() -> Self {
        Self {
            exclude: GlobSet::empty(),
            include: GlobSet::empty(),
            exclude_count: 0,
            include_count: 0,
        }
    }
}

impl GlobPatternMatcher {
    pub fn new<S: AsRef<str>>(exclusions: &[S], inclusions: &[S]) -> Result<Self, PatternError> {
        Ok(Self {
            exclude: build_set(exclusions)?,
            include: build_set(inclusions)?,
            exclude_count: exclusions.len(),
            include_count: inclusions.len(),
        })
    }

    pub fn exclusion_count(&self) -> usize {
        self.exclude_count
    }

    pub fn inclusion_count(&self) -> usize {
        self.include_count
    }
}

impl PatternMatcher for GlobPatternMatcher {
    fn should_exclude(&self, path: &Path) -> bool {
        self.exclude.is_match(path)
    }

    fn should_include(&self, path: &Path) -> bool {
        if self.should_exclude(path) {
            return false;
        }
        self.include_count == 0 || self.include.is_match(path)
    }
}

fn build_set<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, PatternError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref().trim();
        for variant in expand(pattern) {
            let glob = Glob::new(&variant).map_err(|e| PatternError {
                pattern: pattern.to_string(),
                message: e.kind().to_string(),
            })?;
            builder.add(glob);
        }
    }
    builder.build().map_err(|e| PatternError {
        pattern: patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", "),
        message: e.to_string(),
    })
}

fn expand(pattern: &str) -> Vec<String> {
    if pattern.starts_with('/') || pattern.starts_with("**/") {
        vec![pattern.to_string()]
    } else {
        vec![pattern.to_string(), format!("**/{}", pattern)]
    }
}
