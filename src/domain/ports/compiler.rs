//! Compiler port
//!
//! Turns rendered document source into a finished artifact by invoking a
//! PDF engine. The call is synchronous; implementations may take seconds.

use std::path::{Path, PathBuf};

pub trait Compiler: Send + Sync {
    /// Compile `content` with `engine`, writing the artifact to `output_path`.
    ///
    /// Returns the path of the artifact actually produced.
    fn compile(&self, content: &str, engine: &str, output_path: &Path)
        -> Result<PathBuf, CompileError>;
}

/// Opaque compilation failure reported by an engine adapter
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoCompiler;

    impl Compiler for EchoCompiler {
        fn compile(
            &self,
            content: &str,
            _engine: &str,
            output_path: &Path,
        ) -> Result<PathBuf, CompileError> {
            if content.is_empty() {
                return Err(CompileError::new("empty document"));
            }
            Ok(output_path.to_path_buf())
        }
    }

    #[test]
    fn compile_returns_output_path() {
        let compiler = EchoCompiler;
        let out = compiler
            .compile("\\documentclass{article}", "pdflatex", Path::new("out/cv.pdf"))
            .unwrap();
        assert_eq!(out, PathBuf::from("out/cv.pdf"));
    }

    #[test]
    fn compile_error_displays_message() {
        let err = EchoCompiler
            .compile("", "pdflatex", Path::new("out/cv.pdf"))
            .unwrap_err();
        assert_eq!(err.to_string(), "empty document");
    }
}
