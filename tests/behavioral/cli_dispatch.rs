// ABOUTME: Behavioral tests for the goose binary: exit codes, error lines and usage

use anyhow::Result;
use std::process::{Command, Output};
use tempfile::TempDir;

fn goose(args: &[&str]) -> Result<Output> {
    let dir = TempDir::new()?;
    let output = Command::new(env!("CARGO_BIN_EXE_goose"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("GOOSE_SESSION")
        .env_remove("GOOSE_LOG")
        .output()?;
    Ok(output)
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn prints_usage(output: &Output) -> bool {
    String::from_utf8_lossy(&output.stdout).contains("Usage:")
}

#[test]
fn test_unknown_command_prints_usage_and_fails() -> Result<()> {
    let output = goose(&["bogus"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: unknown command: bogus"));
    assert!(prints_usage(&output));
    Ok(())
}

#[test]
fn test_no_command() -> Result<()> {
    let output = goose(&["--dry"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: no command provided"));
    Ok(())
}

#[test]
fn test_help_exits_zero() -> Result<()> {
    for args in [["help"], ["--help"], ["-h"]] {
        let output = goose(&args)?;
        assert!(output.status.success(), "{args:?} should succeed");
        assert!(String::from_utf8_lossy(&output.stdout).contains("handoff"));
    }
    Ok(())
}

#[test]
fn test_unknown_handoff_op() -> Result<()> {
    let output = goose(&["handoff", "close"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: unknown handoff op: close"));
    assert!(prints_usage(&output));
    Ok(())
}

#[test]
fn test_missing_radio_subcommand() -> Result<()> {
    let output = goose(&["radio"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: missing radio subcommand (send|all)"));
    assert!(prints_usage(&output));
    Ok(())
}

#[test]
fn test_session_subcommand_errors_print_usage() -> Result<()> {
    let output = goose(&["session"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: missing subcommand for session (try 'session start')"));
    assert!(prints_usage(&output));

    let output = goose(&["session", "stop"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: unknown session subcommand: stop"));
    assert!(prints_usage(&output));
    Ok(())
}

#[test]
fn test_dry_handoff_echoes_the_append() -> Result<()> {
    let output = goose(&["--dry", "handoff", "ack", "--task", "T-9", "--agent", "goose"])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("append handoffs/outbox/GOOSE.md:\n[20"));
    assert!(stdout.contains("] T-9 ACK by @GOOSE"));
    Ok(())
}
