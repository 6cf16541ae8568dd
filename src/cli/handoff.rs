// ABOUTME: CLI handoff command - append a dated note to the inbox or an outbox

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};

use super::{Context, HandoffArgs, HandoffCommand};
use crate::exec::Executor;
use crate::handoff::{HandoffLog, HandoffNote, HandoffOp};

/// Execute a handoff op, dated today (local time)
pub fn execute<E: Executor>(command: HandoffCommand, ctx: &Context<E>) -> Result<()> {
    let (op, args) = command.into_parts();
    record(op, args, ctx, Local::now().date_naive())?;
    Ok(())
}

/// Validate and append the note, returning the file written relative to the root.
pub fn record<E: Executor>(
    op: HandoffOp,
    args: HandoffArgs,
    ctx: &Context<E>,
    date: NaiveDate,
) -> Result<PathBuf> {
    let note = HandoffNote::new(op, args.task, args.agent, args.branch, args.note)?;
    let log = HandoffLog::new(&ctx.settings, &ctx.config.handoff.dir);
    Ok(log.record(&note, date)?)
}
