//! Subcommand handlers

pub mod build;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docwatch::config::{self, Config};
use docwatch::presentation::{create_reporter, BuildReporter, OutputFormat};
use is_terminal::IsTerminal;

/// Project root plus its resolved configuration
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    /// Resolve `path` against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

/// Load configuration for the current directory, printing unknown-key warnings
pub fn load_project(config_path: Option<&Path>) -> Result<Project> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let root = cwd.canonicalize().unwrap_or(cwd);

    let (config, warnings) = config::load_or_default(config_path, &root)?;
    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    Ok(Project { root, config })
}

pub fn reporter(json: bool) -> Box<dyn BuildReporter> {
    create_reporter(
        OutputFormat::from_json_flag(json),
        std::io::stdout().is_terminal(),
    )
}
