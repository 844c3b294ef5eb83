//! External engine compiler
//!
//! Writes the rendered source next to the requested artifact and runs the
//! engine binary on it:
//!
//! ```text
//! <engine> -interaction=nonstopmode -halt-on-error -output-directory <dir> <stem>.tex
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{CompileError, Compiler};

/// Number of trailing engine log lines kept in an error
const LOG_TAIL_LINES: usize = 12;

/// Compiler that shells out to a TeX-style engine
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCompiler;

impl ProcessCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for ProcessCompiler {
    fn compile(
        &self,
        content: &str,
        engine: &str,
        output_path: &Path,
    ) -> Result<PathBuf, CompileError> {
        let output_dir = match output_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&output_dir).map_err(|e| {
            CompileError::new(format!(
                "cannot create output directory {}: {}",
                output_dir.display(),
                e
            ))
        })?;

        let source_path = output_path.with_extension("tex");
        fs::write(&source_path, content).map_err(|e| {
            CompileError::new(format!("cannot write {}: {}", source_path.display(), e))
        })?;

        debug!(engine, source = %source_path.display(), "running engine");
        let output = Command::new(engine)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg("-output-directory")
            .arg(&output_dir)
            .arg(&source_path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| CompileError::new(format!("failed to run {}: {}", engine, e)))?;

        if !output.status.success() {
            return Err(CompileError::new(format!(
                "{} exited with {}\n{}",
                engine,
                output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                log_tail(&output.stdout)
            )));
        }

        let produced = output_path.with_extension("pdf");
        if !produced.is_file() {
            return Err(CompileError::new(format!(
                "{} succeeded but produced no {}",
                engine,
                produced.display()
            )));
        }
        Ok(produced)
    }
}

fn log_tail(stdout: &[u8]) -> String {
    let text = String::from_utf8_lossy(stdout);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..].join("\n")
}
