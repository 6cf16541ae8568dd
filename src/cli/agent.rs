// ABOUTME: CLI agent add command - ensure an agent branch and worktree exist

use anyhow::Result;

use super::{AgentAddArgs, Context};
use crate::exec::Executor;
use crate::git::{provision_agent, AgentPlan};

/// Execute the agent add command
pub async fn execute<E: Executor>(args: AgentAddArgs, ctx: &Context<E>) -> Result<()> {
    // Validate flags before checking for git so a bad invocation fails the same everywhere
    let plan = AgentPlan::resolve(args.name, args.base, args.branch, args.worktree, &ctx.config.agent)?;

    let git = ctx.git();
    git.require()?;
    provision_agent(&git, &plan, &ctx.settings.root).await?;

    println!(
        "agent '{}' ready: worktree={} branch={}",
        plan.name,
        plan.worktree.display(),
        plan.branch
    );
    Ok(())
}
