// ABOUTME: CLI radio commands - type a command line into agent panes

use anyhow::Result;
use tracing::info;

use super::{Context, RadioAllArgs, RadioSendArgs};
use crate::exec::Executor;
use crate::radio::{self, RadioError};

/// Execute `radio send`
pub async fn send<E: Executor>(args: RadioSendArgs, ctx: &Context<E>) -> Result<()> {
    let target = args
        .target
        .filter(|t| !t.is_empty())
        .ok_or(RadioError::MissingTarget)?;
    let payload = radio::payload(&args.command)?;

    let tmux = ctx.tmux();
    tmux.require()?;
    let target = radio::send(&tmux, ctx.settings.session_name(), Some(target.as_str()), &payload).await?;

    info!("Sent to {}", target);
    Ok(())
}

/// Execute `radio all`
pub async fn all<E: Executor>(args: RadioAllArgs, ctx: &Context<E>) -> Result<()> {
    let payload = radio::payload(&args.command)?;
    let defaults = &ctx.config.radio;
    let agents = radio::roster(args.agents.as_deref(), &defaults.agents);
    let pane = args.pane.unwrap_or(defaults.pane);

    let tmux = ctx.tmux();
    tmux.require()?;
    let delivered = radio::broadcast(&tmux, ctx.settings.session_name(), &agents, pane, &payload).await?;

    info!("Sent to {} pane(s)", delivered.len());
    Ok(())
}
