// ABOUTME: CLI session start command - build the tmux session layout
//
// Creates:
// - lead window: editor | lead agent
// - goose window: editor | goose agent
// - ops window (optional) tailing the handoff files

use anyhow::Result;
use tracing::info;

use super::{Context, SessionStartArgs};
use crate::exec::Executor;
use crate::tmux::layout::absolute_repo;
use crate::tmux::{resolve_session_name, OpsWatch, SessionLayout};

/// Execute the session start command
pub async fn execute<E: Executor>(args: SessionStartArgs, ctx: &Context<E>) -> Result<()> {
    let tmux = ctx.tmux();
    tmux.require()?;

    let defaults = &ctx.config.session;
    let root = absolute_repo(&ctx.settings.root, &args.repo);
    let name = resolve_session_name(ctx.settings.session_name(), &root, &defaults.fallback_name);
    info!("Starting session {} in {}", name, root.display());

    let ops = args.ops.then(|| OpsWatch {
        handoff_dir: ctx.config.handoff.dir.clone(),
        interval_secs: defaults.ops_interval_secs,
    });

    let layout = SessionLayout {
        name,
        root,
        editor: Some(args.editor.unwrap_or_else(|| defaults.editor.clone())),
        lead_agent: args.ai_lead,
        goose_agent: args.ai_goose,
        ops,
        rebuild: args.rebuild,
    };
    layout.build(&tmux).await?;

    println!(
        "session '{}' ready. Attach with: tmux attach -t {}",
        layout.name, layout.name
    );
    Ok(())
}
