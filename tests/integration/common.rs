//! Shared helpers for the CLI integration tests.
//!
//! Every [`TestEnv`] gets its own temporary home directory, configuration
//! file and cache directory, so tests never read or write the user's real
//! `~/.wpreadme` and can run in parallel.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated home directory for one test.
pub struct TestEnv {
    temp: TempDir,
}

impl TestEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Root of the temporary home directory.
    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    /// Configuration file passed with `--config`.
    pub fn config_path(&self) -> PathBuf {
        self.home().join("config.toml")
    }

    /// Cache directory configured by [`write_config`](Self::write_config).
    pub fn cache_dir(&self) -> PathBuf {
        self.home().join("cache")
    }

    /// Write a configuration file whose cache lives inside the environment.
    pub fn write_config(&self, extra: &str) {
        let content = format!(
            "{extra}\n[cache]\nenabled = true\ndir = \"{}\"\n",
            self.cache_dir().display().to_string().replace('\\', "/")
        );
        std::fs::write(self.config_path(), content).expect("failed to write config");
    }

    /// Write a readme and return its path as a string.
    pub fn write_readme(&self, name: &str, content: &str) -> String {
        let path = self.home().join(name);
        std::fs::write(&path, content).expect("failed to write readme");
        path.display().to_string()
    }

    /// Run `wpreadme` with the environment's `--config`.
    pub fn run(&self, args: &[&str]) -> CommandOutput {
        let config = self.config_path();
        let mut cmd = Command::cargo_bin("wpreadme").expect("binary not built");
        cmd.env("HOME", self.home())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("GITHUB_ACCESS_TOKEN")
            .arg("--config")
            .arg(&config)
            .args(args);

        let output = cmd.output().expect("failed to run wpreadme");
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Captured result of one CLI run.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed with exit code 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected failure\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}
