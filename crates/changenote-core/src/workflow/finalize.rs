//! Release finalization
//!
//! Finalization is owned by the change note engine: it writes the version
//! history and moves unreleased notes. changenote only invokes it, either
//! through a configured shell command or through a caller-supplied
//! [`ReleaseFinalizer`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FinalizeError, Result};
use crate::types::Version;

/// Placeholder substituted into the finalize command
pub const VERSION_VARIABLE: &str = "{version}";

/// Finishes a release once the source tree has been rewritten
pub trait ReleaseFinalizer {
    /// Finalize the release, reporting whether it succeeded
    fn finalize(&self, version: &Version) -> Result<bool>;
}

impl<F: ReleaseFinalizer + ?Sized> ReleaseFinalizer for &F {
    fn finalize(&self, version: &Version) -> Result<bool> {
        (**self).finalize(version)
    }
}

impl<F: ReleaseFinalizer + ?Sized> ReleaseFinalizer for Box<F> {
    fn finalize(&self, version: &Version) -> Result<bool> {
        (**self).finalize(version)
    }
}

/// Finalizer that does nothing and reports success
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFinalizer;

impl ReleaseFinalizer for NoopFinalizer {
    fn finalize(&self, version: &Version) -> Result<bool> {
        warn!(version = %version, "no finalize command configured, skipping finalization");
        Ok(true)
    }
}

/// Runs a shell command to finalize the release
#[derive(Debug, Clone)]
pub struct CommandFinalizer {
    /// Command template, `{version}` is replaced with the quoted version uid
    pub command: String,
    /// Working directory
    pub cwd: Option<PathBuf>,
    /// Extra environment variables
    pub env: HashMap<String, String>,
}

impl CommandFinalizer {
    /// Create a finalizer for a command template
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            env: HashMap::new(),
        }
    }

    /// Build the finalizer described by the configuration, if any.
    ///
    /// The command runs in `project_dir` and sees the scanner layout through
    /// `CHANGENOTE_BASE_DIR` and `CHANGENOTE_UNRELEASED_DIR`, plus
    /// `CHANGENOTE_OWNER` and `CHANGENOTE_REPOSITORY` when configured.
    pub fn from_config(config: &Config, project_dir: &Path) -> Option<Self> {
        let command = config.release.finalize_command.as_ref()?;
        let scanner = &config.scanner;
        let base_dir = project_dir.join(&scanner.base_directory);
        let unreleased_dir = scanner.unreleased_path(project_dir);

        let mut finalizer = Self::new(command.clone())
            .with_cwd(project_dir)
            .with_env("CHANGENOTE_BASE_DIR", base_dir.to_string_lossy())
            .with_env("CHANGENOTE_UNRELEASED_DIR", unreleased_dir.to_string_lossy());
        if let Some(owner) = &scanner.owner {
            finalizer = finalizer.with_env("CHANGENOTE_OWNER", owner);
        }
        if let Some(repository) = &scanner.repository {
            finalizer = finalizer.with_env("CHANGENOTE_REPOSITORY", repository);
        }
        Some(finalizer)
    }

    /// Set the working directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Add an environment variable
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// The command line that will run for `version`.
    ///
    /// The uid is quoted as a single shell word so the command receives it
    /// unchanged.
    pub fn render(&self, version: &Version) -> String {
        self.command.replace(VERSION_VARIABLE, &shell_quote(version.uid()))
    }
}

#[cfg(not(windows))]
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(windows)]
fn shell_quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

impl ReleaseFinalizer for CommandFinalizer {
    fn finalize(&self, version: &Version) -> Result<bool> {
        let command = self.render(version);
        info!(command = %command, version = %version, "running finalize command");
        let start = std::time::Instant::now();

        let shell = if cfg!(windows) { "cmd" } else { "sh" };
        let shell_arg = if cfg!(windows) { "/C" } else { "-c" };

        let mut cmd = Command::new(shell);
        cmd.arg(shell_arg).arg(&command);

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        cmd.env("CHANGENOTE_VERSION", version.uid());
        for (k, v) in &self.env {
            cmd.env(k, v);
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|e| FinalizeError::SpawnFailed {
            command: command.clone(),
            message: e.to_string(),
        })?;

        let success = output.status.success();
        debug!(
            exit_code = ?output.status.code(),
            duration_ms = start.elapsed().as_millis() as u64,
            stdout = %String::from_utf8_lossy(&output.stdout),
            "finalize command finished"
        );
        if !success {
            warn!(
                exit_code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "finalize command failed"
            );
        }

        Ok(success)
    }
}
