// ABOUTME: Session layout built by `session start`
//
// Fixed topology, re-derived on every call:
// - lead window: editor (pane 0) | lead agent (pane 1)
// - goose window: editor (pane 0) | goose agent (pane 1)
// - optional ops window whose single pane polls the handoff files

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use super::{pane, Tmux};
use crate::exec::{ExecError, Executor};

pub const LEAD_WINDOW: &str = "lead";
pub const GOOSE_WINDOW: &str = "goose";
pub const OPS_WINDOW: &str = "ops";

/// Watcher loop seeded into the ops window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpsWatch {
    /// Handoff directory, relative to the session root
    pub handoff_dir: String,
    pub interval_secs: u64,
}

impl OpsWatch {
    /// Shell loop printing the inbox tail and every outbox tail.
    ///
    /// Every word built from the handoff dir is quoted once, as a whole.
    pub fn script(&self) -> String {
        let raw_inbox = format!("{}/inbox.md", self.handoff_dir);
        let dir = quote(&self.handoff_dir);
        let inbox = quote(&raw_inbox);
        let missing = quote(&format!("(missing {raw_inbox})"));
        format!(
            "while true; do clear; date; echo INBOX:; \
             [ -f {inbox} ] && tail -n 80 {inbox} || echo {missing}; \
             echo; echo OUTBOX:; for f in {dir}/outbox/*; do echo --- $f; tail -n 40 \"$f\"; done; \
             sleep {secs}; done",
            secs = self.interval_secs,
        )
    }
}

fn quote(word: &str) -> String {
    shell_escape::escape(Cow::from(word)).into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionLayout {
    pub name: String,
    /// Absolute repository path every window starts in
    pub root: PathBuf,
    pub editor: Option<String>,
    pub lead_agent: Option<String>,
    pub goose_agent: Option<String>,
    pub ops: Option<OpsWatch>,
    /// Kill any existing session of the same name first
    pub rebuild: bool,
}

impl SessionLayout {
    /// Issue the tmux calls for this layout.
    ///
    /// The first failing call aborts; windows already created are left as is.
    pub async fn build<E: Executor>(&self, tmux: &Tmux<'_, E>) -> Result<(), ExecError> {
        if self.rebuild {
            tmux.kill_session_quietly(&self.name).await;
        }

        tmux.new_session(&self.name, LEAD_WINDOW, &self.root).await?;
        self.split_and_seed(tmux, LEAD_WINDOW, self.lead_agent.as_deref())
            .await?;

        tmux.new_window(&self.name, GOOSE_WINDOW, &self.root).await?;
        self.split_and_seed(tmux, GOOSE_WINDOW, self.goose_agent.as_deref())
            .await?;

        if let Some(ops) = &self.ops {
            tmux.new_window(&self.name, OPS_WINDOW, &self.root).await?;
            tmux.send_line(&self.target(&pane(OPS_WINDOW, 0)), &ops.script())
                .await?;
        }

        info!("Built tmux session layout: {}", self.name);
        Ok(())
    }

    async fn split_and_seed<E: Executor>(
        &self,
        tmux: &Tmux<'_, E>,
        window: &str,
        agent: Option<&str>,
    ) -> Result<(), ExecError> {
        tmux.split_horizontal(&self.target(window)).await?;

        if let Some(editor) = self.editor.as_deref().filter(|e| !e.is_empty()) {
            tmux.send_line(&self.target(&pane(window, 0)), editor).await?;
        }
        if let Some(agent) = agent.filter(|a| !a.is_empty()) {
            tmux.send_line(&self.target(&pane(window, 1)), agent).await?;
        }

        Ok(())
    }

    fn target(&self, reference: &str) -> String {
        format!("{}:{}", self.name, reference)
    }
}

/// Lexically absolute form of `repo`, resolved against `root`.
pub fn absolute_repo(root: &Path, repo: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in root.join(repo).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    resolved
}

/// Explicit name, else the repo's base name, else `fallback`.
pub fn resolve_session_name(explicit: Option<&str>, repo: &Path, fallback: &str) -> String {
    if let Some(name) = explicit.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    match repo.file_name().and_then(|n| n.to_str()) {
        Some(base) if !base.is_empty() && base != "." && base != "/" => base.to_string(),
        _ => fallback.to_string(),
    }
}
