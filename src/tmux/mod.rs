// ABOUTME: Tmux command layer for goose
//
// Wraps the handful of tmux verbs goose needs, all routed through the
// ProcessRunner so dry-run and verbose apply uniformly:
// - session/window creation and pane splits
// - keystroke injection (literal text followed by Enter)
// - best-effort session teardown

pub mod layout;
pub mod target;

pub use layout::{resolve_session_name, OpsWatch, SessionLayout};
pub use target::{pane, qualify_target};

use std::path::Path;

use tracing::debug;

use crate::exec::{ExecError, Executor, Invocation, ProcessRunner};

/// Multiplexer binary name
pub const TMUX: &str = "tmux";

/// Key name tmux understands as Enter
pub const ENTER: &str = "C-m";

/// Thin handle issuing tmux commands through a runner
pub struct Tmux<'a, E: Executor> {
    runner: &'a ProcessRunner<E>,
}

impl<'a, E: Executor> Tmux<'a, E> {
    pub fn new(runner: &'a ProcessRunner<E>) -> Self {
        Self { runner }
    }

    /// Fail unless tmux is on PATH (skipped under dry-run)
    pub fn require(&self) -> Result<(), ExecError> {
        self.runner.require_tool(TMUX)
    }

    /// Create a detached session whose first window is `window`, rooted at `dir`
    pub async fn new_session(&self, session: &str, window: &str, dir: &Path) -> Result<(), ExecError> {
        let dir = dir.to_string_lossy().into_owned();
        self.tmux(&["new-session", "-d", "-s", session, "-c", dir.as_str(), "-n", window])
            .await
    }

    /// Add a window named `window` to `session`, rooted at `dir`
    pub async fn new_window(&self, session: &str, window: &str, dir: &Path) -> Result<(), ExecError> {
        let dir = dir.to_string_lossy().into_owned();
        self.tmux(&["new-window", "-t", session, "-n", window, "-c", dir.as_str()])
            .await
    }

    /// Split `target` side by side, creating pane 1 to the right of pane 0
    pub async fn split_horizontal(&self, target: &str) -> Result<(), ExecError> {
        self.tmux(&["split-window", "-h", "-t", target]).await
    }

    /// Type `text` into `target` and press Enter
    pub async fn send_line(&self, target: &str, text: &str) -> Result<(), ExecError> {
        debug!("Sending to {}: {}", target, text);
        self.tmux(&["send-keys", "-t", target, text, ENTER]).await
    }

    /// Kill `session`, ignoring failure (it may not exist yet)
    pub async fn kill_session_quietly(&self, session: &str) {
        if let Err(e) = self.tmux(&["kill-session", "-t", session]).await {
            debug!("Ignoring kill-session failure: {:#}", e);
        }
    }

    async fn tmux(&self, args: &[&str]) -> Result<(), ExecError> {
        self.runner
            .run(Invocation::new(TMUX, args.iter().copied()))
            .await
    }
}
