// ABOUTME: Git operations used for agent provisioning (branches and worktrees)

pub mod provision;

pub use provision::{provision_agent, AgentPlan, ProvisionError, Provisioned};

use std::path::Path;

use crate::exec::{ExecError, Executor, Invocation, ProcessRunner};

/// Version-control binary name
pub const GIT: &str = "git";

/// Thin handle issuing git commands through a runner
pub struct Git<'a, E: Executor> {
    runner: &'a ProcessRunner<E>,
}

impl<'a, E: Executor> Git<'a, E> {
    pub fn new(runner: &'a ProcessRunner<E>) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &ProcessRunner<E> {
        self.runner
    }

    /// Fail unless git is on PATH (skipped under dry-run)
    pub fn require(&self) -> Result<(), ExecError> {
        self.runner.require_tool(GIT)
    }

    /// Whether a local branch named `branch` exists
    pub async fn branch_exists(&self, branch: &str) -> Result<bool, ExecError> {
        let reference = format!("refs/heads/{branch}");
        self.runner
            .probe(Invocation::new(
                GIT,
                ["show-ref", "--verify", "--quiet", reference.as_str()],
            ))
            .await
    }

    /// Create `branch` pointing at `base`
    pub async fn create_branch(&self, branch: &str, base: &str) -> Result<(), ExecError> {
        self.runner
            .run(Invocation::new(GIT, ["branch", branch, base]))
            .await
    }

    /// Check out `branch` into a new worktree at `path`
    pub async fn add_worktree(&self, path: &Path, branch: &str) -> Result<(), ExecError> {
        let path = path.to_string_lossy().into_owned();
        self.runner
            .run(Invocation::new(GIT, ["worktree", "add", path.as_str(), branch]))
            .await
    }
}
