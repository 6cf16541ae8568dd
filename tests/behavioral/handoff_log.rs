// ABOUTME: Behavioral tests for handoff notes: what each op appends, and where

use anyhow::Result;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

use goose::cli::{handoff, Commands};

use crate::fixtures::prepare;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()
}

/// Run `goose handoff ...` in `root` with a fixed date
fn run_handoff(root: &TempDir, args: &[&str]) -> Result<()> {
    let mut argv = vec!["handoff"];
    argv.extend_from_slice(args);
    let (command, ctx) = prepare(&argv, root.path())?;

    let Commands::Handoff { op: Some(op) } = command else {
        anyhow::bail!("not a handoff op: {argv:?}");
    };
    let (op, args) = op.into_parts();
    handoff::record(op, args, &ctx, date())?;
    Ok(())
}

#[test]
fn test_open_appends_one_block_to_inbox() -> Result<()> {
    let root = TempDir::new()?;

    run_handoff(&root, &["open", "--task", "T-1", "--agent", "goose", "--note", "auth flow"])?;
    run_handoff(&root, &["open", "--task", "T-2", "--agent", "Maverick"])?;

    let inbox = fs::read_to_string(root.path().join("handoffs/inbox.md"))?;
    assert_eq!(
        inbox,
        "## T-1 (OPEN)\nby @GOOSE\nnote: auth flow\ncreated: 2026-05-14\n\n\
         ## T-2 (OPEN)\nby @MAVERICK\ncreated: 2026-05-14\n\n"
    );
    assert!(root.path().join("handoffs/outbox").is_dir());
    Ok(())
}

#[test]
fn test_status_ops_append_one_line_each_to_agent_outbox() -> Result<()> {
    let root = TempDir::new()?;

    run_handoff(&root, &["ack", "--task", "T-1", "--agent", "goose"])?;
    run_handoff(&root, &["progress", "--task", "T-1", "--agent", "goose", "--branch", "agent/goose"])?;
    run_handoff(
        &root,
        &["done", "--task", "T-1", "--agent", "goose", "--branch", "agent/goose", "--note", "merged"],
    )?;

    let outbox = fs::read_to_string(root.path().join("handoffs/outbox/GOOSE.md"))?;
    assert_eq!(
        outbox.lines().collect::<Vec<_>>(),
        vec![
            "[2026-05-14] T-1 ACK by @GOOSE",
            "[2026-05-14] T-1 PROGRESS @GOOSE branch:agent/goose",
            "[2026-05-14] T-1 DONE @GOOSE branch:agent/goose note:merged",
        ]
    );
    assert!(!root.path().join("handoffs/inbox.md").exists());
    Ok(())
}

#[test]
fn test_progress_without_branch_fails_before_any_write() -> Result<()> {
    let root = TempDir::new()?;

    let err = run_handoff(&root, &["progress", "--task", "T-1", "--agent", "goose"]).unwrap_err();

    assert_eq!(err.to_string(), "--branch is required for progress");
    assert!(!root.path().join("handoffs").exists());
    Ok(())
}

#[test]
fn test_missing_task_and_agent_are_rejected() -> Result<()> {
    let root = TempDir::new()?;

    let err = run_handoff(&root, &["ack", "--agent", "goose"]).unwrap_err();
    assert_eq!(err.to_string(), "--task is required");

    let err = run_handoff(&root, &["open", "--task", "T-1"]).unwrap_err();
    assert_eq!(err.to_string(), "--agent is required");

    assert!(!root.path().join("handoffs").exists());
    Ok(())
}
