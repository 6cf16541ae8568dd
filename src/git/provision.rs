// ABOUTME: Agent provisioning: make sure an agent's branch and worktree exist
//
// Both steps are existence-gated, so provisioning the same agent twice is a
// no-op the second time:
// 1. branch missing -> create it from the base branch
// 2. worktree path missing -> `git worktree add <path> <branch>`

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use super::Git;
use crate::config::AgentDefaults;
use crate::exec::{ExecError, Executor};

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("--name is required")]
    MissingName,
    #[error("invalid agent name: {0}")]
    InvalidName(String),
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),
    #[error("failed creating branch '{branch}' from '{base}'")]
    BranchCreate {
        branch: String,
        base: String,
        #[source]
        source: ExecError,
    },
    #[error(transparent)]
    Exec(#[from] ExecError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Resolved agent record: who, which branch, where it is checked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentPlan {
    pub name: String,
    pub base: String,
    pub branch: String,
    /// Worktree path, relative to the repository root unless absolute
    pub worktree: PathBuf,
}

impl AgentPlan {
    /// Fill unset fields from the defaults (`agent/<name>`, `personas/<name>`).
    pub fn resolve(
        name: Option<String>,
        base: Option<String>,
        branch: Option<String>,
        worktree: Option<PathBuf>,
        defaults: &AgentDefaults,
    ) -> Result<Self, ProvisionError> {
        let name = name
            .filter(|n| !n.is_empty())
            .ok_or(ProvisionError::MissingName)?;
        validate_agent_name(&name)?;

        let base = base
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| defaults.base.clone());
        let branch = branch
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| format!("{}/{}", defaults.branch_prefix, name));
        let worktree = worktree
            .filter(|w| !w.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(&defaults.worktree_dir).join(&name));

        // base is any revision git accepts; git itself reports bad ones
        validate_branch_name(&branch)?;

        Ok(Self {
            name,
            base,
            branch,
            worktree,
        })
    }
}

/// What a provisioning run actually changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Provisioned {
    pub branch_created: bool,
    pub worktree_created: bool,
}

/// Ensure the plan's branch, then its worktree. `root` anchors relative worktree paths.
pub async fn provision_agent<E: Executor>(
    git: &Git<'_, E>,
    plan: &AgentPlan,
    root: &Path,
) -> Result<Provisioned, ProvisionError> {
    let branch_created = ensure_branch(git, &plan.branch, &plan.base).await?;
    let worktree_created = ensure_worktree(git, &plan.worktree, &plan.branch, root).await?;

    info!(
        "Provisioned agent {} (branch created: {}, worktree created: {})",
        plan.name, branch_created, worktree_created
    );

    Ok(Provisioned {
        branch_created,
        worktree_created,
    })
}

async fn ensure_branch<E: Executor>(
    git: &Git<'_, E>,
    branch: &str,
    base: &str,
) -> Result<bool, ProvisionError> {
    if git.branch_exists(branch).await? {
        git.runner().note(format!("branch '{branch}' exists"));
        return Ok(false);
    }

    git.create_branch(branch, base)
        .await
        .map_err(|source| ProvisionError::BranchCreate {
            branch: branch.to_string(),
            base: base.to_string(),
            source,
        })?;

    debug!("Created branch {} from {}", branch, base);
    Ok(true)
}

async fn ensure_worktree<E: Executor>(
    git: &Git<'_, E>,
    worktree: &Path,
    branch: &str,
    root: &Path,
) -> Result<bool, ProvisionError> {
    match std::fs::metadata(root.join(worktree)) {
        Ok(_) => {
            git.runner().note(format!(
                "worktree exists at {} (skipping add)",
                worktree.display()
            ));
            Ok(false)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            git.add_worktree(worktree, branch).await?;
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

/// Names may nest (`team/goose`) but every segment must be a plain path component.
fn validate_agent_name(name: &str) -> Result<(), ProvisionError> {
    if name
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(ProvisionError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn validate_branch_name(name: &str) -> Result<(), ProvisionError> {
    if name.is_empty() {
        return Err(ProvisionError::InvalidBranchName(
            "Branch name cannot be empty".to_string(),
        ));
    }

    // Git branch name validation rules
    let invalid_chars = [' ', '~', '^', ':', '?', '*', '[', '\\'];
    if name.chars().any(|c| invalid_chars.contains(&c) || c.is_whitespace()) {
        return Err(ProvisionError::InvalidBranchName(name.to_string()));
    }

    if name.starts_with('-') || name.ends_with('/') || name.contains("//") {
        return Err(ProvisionError::InvalidBranchName(name.to_string()));
    }

    Ok(())
}
