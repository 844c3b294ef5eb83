//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocwatchError, DocwatchResult};

use super::types::Config;

/// Default project configuration file name
pub const CONFIG_FILE_NAME: &str = "docwatch.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DocwatchResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DocwatchError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `path` if given, else `docwatch.toml` in `project_root` if present,
/// else defaults. An explicitly named file must exist.
pub fn load_or_default(
    path: Option<&Path>,
    project_root: &Path,
) -> DocwatchResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match path {
        Some(explicit) => load_with_warnings(explicit)?,
        None => {
            let candidate = project_root.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                load_with_warnings(&candidate)?
            } else {
                (Config::default(), Vec::new())
            }
        }
    };
    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (DOCWATCH_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // DOCWATCH_ENGINE
    if let Ok(engine) = std::env::var("DOCWATCH_ENGINE") {
        if !engine.trim().is_empty() {
            config.build.engine = engine.trim().to_string();
        }
    }

    // DOCWATCH_CONCURRENCY (ignored unless a positive integer)
    if let Ok(val) = std::env::var("DOCWATCH_CONCURRENCY") {
        if let Ok(n) = val.trim().parse::<usize>() {
            if n > 0 {
                config.build.concurrency = Some(n);
            }
        }
    }

    // DOCWATCH_TIMEOUT_SECS
    if let Ok(val) = std::env::var("DOCWATCH_TIMEOUT_SECS") {
        if let Ok(secs) = val.trim().parse::<u64>() {
            if secs > 0 {
                config.build.timeout_secs = secs;
            }
        }
    }

    // DOCWATCH_DEBOUNCE_MS
    if let Ok(val) = std::env::var("DOCWATCH_DEBOUNCE_MS") {
        if let Ok(ms) = val.trim().parse::<u64>() {
            config.watch.debounce_ms = ms;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "engine",
        "output_dir",
        "concurrency",
        "timeout_secs",
        "watch",
        "debounce_ms",
        "exclude",
        "include",
        "templates",
        "template",
        "data",
        "priority",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
