// ABOUTME: External process execution for tmux and git with dry-run and verbose echo
//
// Every side-effecting call goes through ProcessRunner so that:
// - dry-run never spawns a child process
// - verbose and dry-run print the invocation before it happens
// - tool presence is checked against PATH (skipped under dry-run)

// Test double shared by unit and behavioral tests; not part of the documented API.
#[cfg(unix)]
#[doc(hidden)]
pub mod recording;

#[cfg(unix)]
#[doc(hidden)]
pub use recording::RecordingExecutor;

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::config::Settings;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("required tool not found in PATH: {0}")]
    ToolNotFound(String),
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` failed ({status})")]
    Failed { command: String, status: ExitStatus },
}

/// A program plus its arguments, kept unexpanded (no shell involved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Invocation {
    /// Renders the invocation as a copy-pasteable shell line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", shell_escape::escape(Cow::from(arg.as_str())))?;
        }
        Ok(())
    }
}

/// How a child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child writes straight to our stdout/stderr.
    Inherit,
    /// All output discarded; used for existence probes.
    Silent,
}

/// Spawns processes on behalf of [`ProcessRunner`].
///
/// The system implementation talks to the OS; [`RecordingExecutor`] only
/// records what it was asked to do.
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Whether `program` resolves on the execution path.
    fn is_installed(&self, program: &str) -> bool;

    /// Run the invocation to completion in `dir`.
    async fn execute(
        &self,
        invocation: &Invocation,
        dir: &Path,
        mode: OutputMode,
    ) -> io::Result<ExitStatus>;
}

/// Executor backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        dir: &Path,
        mode: OutputMode,
    ) -> io::Result<ExitStatus> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .current_dir(dir)
            .stdin(Stdio::null());

        if mode == OutputMode::Silent {
            command.stdout(Stdio::null()).stderr(Stdio::null());
        }

        command.status().await
    }
}

/// Runs external programs according to the invocation's settings.
pub struct ProcessRunner<E = SystemExecutor> {
    executor: E,
    dir: PathBuf,
    dry_run: bool,
    verbose: bool,
}

impl<E: Executor> ProcessRunner<E> {
    pub fn new(executor: E, settings: &Settings) -> Self {
        Self {
            executor,
            dir: settings.root.clone(),
            dry_run: settings.dry_run,
            verbose: settings.verbose,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Print a progress note, only in verbose mode.
    pub fn note(&self, message: impl fmt::Display) {
        if self.verbose {
            println!("{message}");
        }
    }

    /// Fail unless `program` is on PATH. Dry-run skips the check entirely.
    pub fn require_tool(&self, program: &str) -> Result<(), ExecError> {
        if self.dry_run {
            return Ok(());
        }
        if self.executor.is_installed(program) {
            Ok(())
        } else {
            Err(ExecError::ToolNotFound(program.to_string()))
        }
    }

    /// Run with inherited output; a non-zero exit is an error.
    pub async fn run(&self, invocation: Invocation) -> Result<(), ExecError> {
        if self.verbose || self.dry_run {
            println!("$ {invocation}");
        }
        if self.dry_run {
            debug!(command = %invocation, "dry-run: not executed");
            return Ok(());
        }

        let status = self.spawn(&invocation, OutputMode::Inherit).await?;
        if status.success() {
            Ok(())
        } else {
            Err(ExecError::Failed {
                command: invocation.to_string(),
                status,
            })
        }
    }

    /// Run silently and report whether the program exited successfully.
    ///
    /// Under dry-run nothing is spawned and the probe reports success.
    pub async fn probe(&self, invocation: Invocation) -> Result<bool, ExecError> {
        if self.verbose {
            println!("$ {invocation}");
        }
        if self.dry_run {
            return Ok(true);
        }

        let status = self.spawn(&invocation, OutputMode::Silent).await?;
        Ok(status.success())
    }

    async fn spawn(&self, invocation: &Invocation, mode: OutputMode) -> Result<ExitStatus, ExecError> {
        debug!(command = %invocation, dir = %self.dir.display(), "spawning");
        self.executor
            .execute(invocation, &self.dir, mode)
            .await
            .map_err(|source| ExecError::Spawn {
                command: invocation.to_string(),
                source,
            })
    }
}
