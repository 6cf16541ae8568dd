// ABOUTME: Executor that records invocations instead of spawning them
//
// Lets the session, agent and radio flows be exercised without tmux or git
// installed. Failures can be scripted by substring so abort paths are
// reachable too.

use std::io;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::ExitStatus;
use std::sync::Mutex;

use super::{Executor, Invocation, OutputMode};

#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<Invocation>>,
    failures: Vec<String>,
    missing_tools: Vec<String>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit with status 1 for any invocation whose command line contains `needle`.
    #[must_use]
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.failures.push(needle.to_string());
        self
    }

    /// Report `program` as absent from PATH.
    #[must_use]
    pub fn without_tool(mut self, program: &str) -> Self {
        self.missing_tools.push(program.to_string());
        self
    }

    /// Every invocation received so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Executor for RecordingExecutor {
    fn is_installed(&self, program: &str) -> bool {
        !self.missing_tools.iter().any(|tool| tool == program)
    }

    async fn execute(
        &self,
        invocation: &Invocation,
        _dir: &Path,
        _mode: OutputMode,
    ) -> io::Result<ExitStatus> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        let line = format!("{} {}", invocation.program, invocation.args.join(" "));
        let code = if self.failures.iter().any(|needle| line.contains(needle.as_str())) {
            1
        } else {
            0
        };

        // Raw wait status: exit code lives in the high byte.
        Ok(ExitStatus::from_raw(code << 8))
    }
}
