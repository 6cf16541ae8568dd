// ABOUTME: Main entry point for goose, the multi-agent dev runner
//
// Binary: goose
// Usage: goose [--dry] [--verbose] [--session name] [--config path] <command> [<args>]
// - session start: build the tmux session layout
// - agent add: ensure an agent branch and worktree
// - handoff open|ack|progress|done: append handoff notes
// - radio send|all: type commands into agent panes

#![allow(missing_docs)]

use std::process::ExitCode;

use anyhow::Result;
use goose::cli::{self, CliError, Parsed};
use goose::exec::SystemExecutor;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let parsed = match cli::parse(std::env::args()) {
        Ok(parsed) => parsed,
        Err(err) => return fail(&anyhow::Error::from(err)),
    };

    let args = match parsed {
        Parsed::Help(text) => {
            print!("{text}");
            return ExitCode::SUCCESS;
        }
        Parsed::Run(args) => args,
    };

    setup_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

async fn run(args: cli::Cli) -> Result<()> {
    let root = std::env::current_dir()?;
    cli::run(args, root, SystemExecutor).await
}

fn fail(err: &anyhow::Error) -> ExitCode {
    if err
        .downcast_ref::<CliError>()
        .is_some_and(CliError::shows_usage)
    {
        println!("{}", cli::usage());
    }
    eprintln!("error: {err:#}");
    ExitCode::FAILURE
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::prelude::*;

    let default_filter = if verbose { "goose=debug" } else { "goose=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_env("GOOSE_LOG")
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}
