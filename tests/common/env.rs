//! Test environment builder for isolated docwatch testing.
//!
//! Provides `TestEnv` - an isolated project directory with optional
//! templates, config and fake engines, plus helpers to run the CLI.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

use super::fixtures;

/// Variables that must not leak in from the developer's shell
const ISOLATED_VARS: &[&str] = &[
    "DOCWATCH_ENGINE",
    "DOCWATCH_CONCURRENCY",
    "DOCWATCH_DEBOUNCE_MS",
    "DOCWATCH_TIMEOUT_SECS",
    "DOCWATCH_LOG",
];

/// Result of running a docwatch CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON {l:?}: {e}")))
            .collect()
    }
}

/// Isolated test environment with a temp project directory.
pub struct TestEnv {
    /// Temporary directory for the project
    pub project_root: TempDir,
    /// Path to the docwatch binary
    docwatch_bin: PathBuf,
}

impl TestEnv {
    /// Create a new TestEnvBuilder
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Absolute path of a fake engine installed by the builder
    pub fn engine_path(&self, name: &str) -> String {
        self.project_path(&format!("engines/{}", name))
            .display()
            .to_string()
    }

    /// Run docwatch in this environment from project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run docwatch from project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let output = self
            .command(args, env_vars)
            .output()
            .expect("Failed to execute docwatch");
        self.output_to_result(output)
    }

    /// Start docwatch without waiting for it to exit
    pub fn spawn(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Child {
        self.command(args, env_vars)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn docwatch")
    }

    fn command(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.docwatch_bin);
        cmd.current_dir(self.project_root.path()).args(args);
        for key in ISOLATED_VARS {
            cmd.env_remove(key);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Convert Command output to TestResult
    fn output_to_result(&self, output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Read a project file, empty if missing
    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path)).unwrap_or_default()
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        write_file(&self.project_path(relative_path), content);
    }

    /// Replace a project file atomically (write a sibling, then rename)
    pub fn replace_project_file(&self, relative_path: &str, content: &str) {
        let target = self.project_path(relative_path);
        let staging = self.project_path(&format!("{}.staging", relative_path));
        write_file(&staging, content);
        std::fs::rename(&staging, &target).expect("Failed to rename file");
    }

    /// Poll until `relative_path` contains `needle` or `timeout` elapses
    pub fn wait_for_content(&self, relative_path: &str, needle: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.read_project_file(relative_path).contains(needle) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    config: Option<String>,
    fake_engines: bool,
}

impl TestEnvBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            config: None,
            fake_engines: false,
        }
    }

    /// Add a file to the project
    pub fn with_file(mut self, name: &str, content: &str) -> Self {
        self.files.push((name.to_string(), content.to_string()));
        self
    }

    /// Add a template and its data file
    pub fn with_template(self, stem: &str) -> Self {
        self.with_file(&format!("{}.tex", stem), fixtures::TEMPLATE)
            .with_file(&format!("{}.toml", stem), fixtures::DATA)
    }

    /// Set docwatch.toml content
    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    /// Install the fake engine scripts under `engines/`
    pub fn with_fake_engines(mut self) -> Self {
        self.fake_engines = true;
        self
    }

    /// Build the TestEnv
    pub fn build(self) -> TestEnv {
        let project_root = tempfile::tempdir().expect("Failed to create project dir");
        let root = project_root.path();

        for (name, content) in &self.files {
            write_file(&root.join(name), content);
        }
        if let Some(config) = &self.config {
            write_file(&root.join("docwatch.toml"), config);
        }
        if self.fake_engines {
            for (name, script) in fixtures::FAKE_ENGINES {
                install_script(&root.join("engines").join(name), script);
            }
        }

        TestEnv {
            project_root,
            docwatch_bin: PathBuf::from(env!("CARGO_BIN_EXE_docwatch")),
        }
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

#[cfg(unix)]
fn install_script(path: &Path, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    write_file(path, script);
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

#[cfg(not(unix))]
fn install_script(path: &Path, script: &str) {
    write_file(path, script);
}
