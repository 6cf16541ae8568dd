// ABOUTME: Behavioral tests for `session start`: the tmux calls issued for each layout option

use anyhow::Result;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use goose::cli;
use goose::exec::{Invocation, RecordingExecutor};

use crate::fixtures::{prepare, prepare_with};

fn tmux(args: &[&str]) -> Invocation {
    Invocation::new("tmux", args.iter().copied())
}

#[tokio::test]
async fn test_session_named_after_repo() -> Result<()> {
    let root = TempDir::new()?;
    let repo = root.path().join("app");
    fs::create_dir(&repo)?;
    let repo_arg = repo.to_string_lossy().into_owned();

    let (command, ctx) = prepare(
        &["session", "start", "--repo", repo_arg.as_str(), "--ai-lead", "claude", "--ai-goose", "codex"],
        root.path(),
    )?;
    cli::execute(command, &ctx).await?;

    assert_eq!(
        ctx.runner.executor().calls(),
        vec![
            tmux(&["new-session", "-d", "-s", "app", "-c", repo_arg.as_str(), "-n", "lead"]),
            tmux(&["split-window", "-h", "-t", "app:lead"]),
            tmux(&["send-keys", "-t", "app:lead.0", "nvim", "C-m"]),
            tmux(&["send-keys", "-t", "app:lead.1", "claude", "C-m"]),
            tmux(&["new-window", "-t", "app", "-n", "goose", "-c", repo_arg.as_str()]),
            tmux(&["split-window", "-h", "-t", "app:goose"]),
            tmux(&["send-keys", "-t", "app:goose.0", "nvim", "C-m"]),
            tmux(&["send-keys", "-t", "app:goose.1", "codex", "C-m"]),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_session_override_rebuild_and_ops() -> Result<()> {
    let root = TempDir::new()?;
    let (command, ctx) = prepare(
        &["--session", "flight", "session", "start", "--editor", "", "--ops", "--rebuild"],
        root.path(),
    )?;
    cli::execute(command, &ctx).await?;

    let calls = ctx.runner.executor().calls();
    let verbs: Vec<&str> = calls.iter().map(|c| c.args[0].as_str()).collect();
    assert_eq!(
        verbs,
        vec!["kill-session", "new-session", "split-window", "new-window", "split-window", "new-window", "send-keys"]
    );
    assert_eq!(calls[0], tmux(&["kill-session", "-t", "flight"]));

    let watcher = &calls[6];
    assert_eq!(watcher.args[2], "flight:ops.0");
    assert!(watcher.args[3].contains("tail -n 80 handoffs/inbox.md"));
    Ok(())
}

#[tokio::test]
async fn test_failed_tmux_call_aborts_the_layout() -> Result<()> {
    let root = TempDir::new()?;
    let (command, ctx) = prepare_with(
        &["--session", "flight", "session", "start", "--rebuild"],
        root.path(),
        RecordingExecutor::new()
            .failing_on("kill-session")
            .failing_on("split-window"),
    )?;

    let err = cli::execute(command, &ctx).await.unwrap_err();

    assert!(err.to_string().contains("split-window"));
    // kill failure swallowed, then new-session, then the failing split
    assert_eq!(ctx.runner.executor().calls().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_missing_subcommand() -> Result<()> {
    let root = TempDir::new()?;
    let (command, ctx) = prepare(&["session"], root.path())?;

    let err = cli::execute(command, &ctx).await.unwrap_err();

    assert_eq!(err.to_string(), "missing subcommand for session (try 'session start')");
    Ok(())
}
