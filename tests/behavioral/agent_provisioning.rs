// ABOUTME: Behavioral tests for `agent add` against real git repositories
// in temporary directories.

use anyhow::Result;
use pretty_assertions::assert_eq;

use goose::cli;
use goose::exec::SystemExecutor;

use crate::fixtures::{parse_cli, TestRepo};
use crate::require_git;

#[tokio::test]
async fn test_agent_add_creates_branch_and_worktree() -> Result<()> {
    require_git!();

    // GIVEN: A repository with a dev branch
    let repo = TestRepo::new()?;
    repo.git(&["branch", "dev"])?;

    // WHEN: Adding an agent with defaults
    let args = parse_cli(&["agent", "add", "--name", "goose"])?;
    cli::run(args, repo.path().to_path_buf(), SystemExecutor).await?;

    // THEN: agent/goose exists and is checked out under personas/goose
    assert!(repo.branch_exists("agent/goose"));
    assert!(repo.path().join("personas/goose/README.md").exists());
    assert_eq!(repo.worktree_count()?, 2);
    Ok(())
}

#[tokio::test]
async fn test_agent_add_is_idempotent() -> Result<()> {
    require_git!();

    let repo = TestRepo::new()?;
    repo.git(&["branch", "dev"])?;

    let add = || parse_cli(&["agent", "add", "--name", "maverick", "--worktree", "crew/mav"]);
    cli::run(add()?, repo.path().to_path_buf(), SystemExecutor).await?;
    let head_before = repo.git(&["rev-parse", "agent/maverick"])?;

    // WHEN: Running the same add a second time
    cli::run(add()?, repo.path().to_path_buf(), SystemExecutor).await?;

    // THEN: Nothing changed
    assert_eq!(repo.git(&["rev-parse", "agent/maverick"])?, head_before);
    assert_eq!(repo.worktree_count()?, 2);
    Ok(())
}

#[tokio::test]
async fn test_agent_add_reuses_existing_branch() -> Result<()> {
    require_git!();

    // GIVEN: The agent branch already exists, but no base branch does
    let repo = TestRepo::new()?;
    repo.git(&["branch", "agent/iceman"])?;

    // WHEN/THEN: The missing base is never consulted
    let args = parse_cli(&["agent", "add", "--name", "iceman"])?;
    cli::run(args, repo.path().to_path_buf(), SystemExecutor).await?;

    assert!(repo.path().join("personas/iceman").is_dir());
    Ok(())
}

#[tokio::test]
async fn test_base_accepts_any_revision() -> Result<()> {
    require_git!();

    // GIVEN: A repository with two commits
    let repo = TestRepo::new()?;
    std::fs::write(repo.path().join("notes.md"), "second\n")?;
    repo.git(&["add", "notes.md"])?;
    repo.git(&["commit", "-m", "Second commit"])?;

    // WHEN: Basing the agent on the previous commit
    let args = parse_cli(&["agent", "add", "--name", "goose", "--base", "HEAD~1"])?;
    cli::run(args, repo.path().to_path_buf(), SystemExecutor).await?;

    // THEN: The agent branch points at HEAD~1, not HEAD
    assert_eq!(
        repo.git(&["rev-parse", "agent/goose"])?,
        repo.git(&["rev-parse", "HEAD~1"])?
    );
    assert!(!repo.path().join("personas/goose/notes.md").exists());
    Ok(())
}

#[tokio::test]
async fn test_nested_agent_name() -> Result<()> {
    require_git!();

    let repo = TestRepo::new()?;
    repo.git(&["branch", "dev"])?;

    let args = parse_cli(&["agent", "add", "--name", "team/goose"])?;
    cli::run(args, repo.path().to_path_buf(), SystemExecutor).await?;

    assert!(repo.branch_exists("agent/team/goose"));
    assert!(repo.path().join("personas/team/goose/README.md").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_base_branch_is_reported_with_context() -> Result<()> {
    require_git!();

    let repo = TestRepo::new()?;

    let args = parse_cli(&["agent", "add", "--name", "goose", "--base", "nope"])?;
    let err = cli::run(args, repo.path().to_path_buf(), SystemExecutor)
        .await
        .unwrap_err();

    assert!(format!("{err:#}").starts_with("failed creating branch 'agent/goose' from 'nope': "));
    assert!(!repo.path().join("personas").exists());
    Ok(())
}

#[tokio::test]
async fn test_agent_add_requires_name() -> Result<()> {
    let dir = tempfile::TempDir::new()?;

    let args = parse_cli(&["agent", "add"])?;
    let err = cli::run(args, dir.path().to_path_buf(), SystemExecutor)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "--name is required");
    Ok(())
}
