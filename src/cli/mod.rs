// ABOUTME: CLI argument parsing and command routing for goose
//
// Provides command-line interface for:
// - Building the tmux session layout (session start)
// - Provisioning agent branches and worktrees (agent add)
// - Writing handoff notes (handoff open|ack|progress|done)
// - Typing commands into agent panes (radio send|all)

pub mod agent;
pub mod handoff;
pub mod radio;
pub mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{CommandFactory, Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::config::{AppConfig, Settings};
use crate::exec::{Executor, ProcessRunner, SystemExecutor};
use crate::git::Git;
use crate::handoff::HandoffOp;
use crate::tmux::Tmux;

/// Multi-agent dev runner: tmux sessions, git worktrees and handoff notes
#[derive(Parser, Debug)]
#[command(name = "goose")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print actions without executing them
    #[arg(long)]
    pub dry: bool,

    /// Echo every external command and file append
    #[arg(long)]
    pub verbose: bool,

    /// tmux session name (default: repo base name, else 'flight')
    #[arg(long, env = "GOOSE_SESSION")]
    pub session: Option<String>,

    /// Config file overriding the built-in defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Per-invocation settings rooted at `root`
    pub fn settings(&self, root: PathBuf) -> Settings {
        Settings {
            dry_run: self.dry,
            verbose: self.verbose,
            session: self.session.clone(),
            root,
        }
    }
}

/// Available command groups
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a tmux session with windows/panes
    Session {
        #[command(subcommand)]
        action: Option<SessionCommand>,
    },

    /// Add/update an agent worktree and branch
    Agent {
        #[command(subcommand)]
        action: Option<AgentCommand>,
    },

    /// Write handoff inbox/outbox entries
    Handoff {
        #[command(subcommand)]
        op: Option<HandoffCommand>,
    },

    /// Send commands to tmux panes
    Radio {
        #[command(subcommand)]
        action: Option<RadioCommand>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Build the lead/goose (and optional ops) windows
    Start(SessionStartArgs),
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// Ensure the agent's branch and worktree exist
    Add(AgentAddArgs),
}

#[derive(Subcommand, Debug)]
pub enum HandoffCommand {
    /// Open a task in the shared inbox
    Open(HandoffArgs),
    /// Acknowledge a task
    Ack(HandoffArgs),
    /// Report progress on a branch
    Progress(HandoffArgs),
    /// Report a task finished on a branch
    Done(HandoffArgs),
}

impl HandoffCommand {
    /// The op and its flags
    pub fn into_parts(self) -> (HandoffOp, HandoffArgs) {
        match self {
            Self::Open(args) => (HandoffOp::Open, args),
            Self::Ack(args) => (HandoffOp::Ack, args),
            Self::Progress(args) => (HandoffOp::Progress, args),
            Self::Done(args) => (HandoffOp::Done, args),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RadioCommand {
    /// Send a command to one pane
    Send(RadioSendArgs),
    /// Send a command to every agent's pane
    All(RadioAllArgs),
}

/// Arguments for `session start`
#[derive(clap::Args, Debug)]
pub struct SessionStartArgs {
    /// Repository the session windows start in
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,

    /// Command launched in the lead agent pane
    #[arg(long)]
    pub ai_lead: Option<String>,

    /// Command launched in the goose agent pane
    #[arg(long)]
    pub ai_goose: Option<String>,

    /// Editor launched in pane 0 (empty string for none)
    #[arg(long)]
    pub editor: Option<String>,

    /// Add an ops window watching the handoff files
    #[arg(long)]
    pub ops: bool,

    /// Kill an existing session of the same name first
    #[arg(long)]
    pub rebuild: bool,
}

/// Arguments for `agent add`
#[derive(clap::Args, Debug)]
pub struct AgentAddArgs {
    /// Agent name
    #[arg(long)]
    pub name: Option<String>,

    /// Branch the agent branch is created from
    #[arg(long)]
    pub base: Option<String>,

    /// Worktree path (default: personas/<name>)
    #[arg(long)]
    pub worktree: Option<PathBuf>,

    /// Branch name (default: agent/<name>)
    #[arg(long)]
    pub branch: Option<String>,
}

/// Arguments shared by every handoff op
#[derive(clap::Args, Debug, Default)]
pub struct HandoffArgs {
    /// Task identifier
    #[arg(long)]
    pub task: Option<String>,

    /// Agent writing the note
    #[arg(long)]
    pub agent: Option<String>,

    /// Branch carrying the work (progress and done)
    #[arg(long)]
    pub branch: Option<String>,

    /// Free-form note
    #[arg(long)]
    pub note: Option<String>,
}

/// Arguments for `radio send`
#[derive(clap::Args, Debug)]
pub struct RadioSendArgs {
    /// Pane to type into, e.g. goose.1
    #[arg(long)]
    pub target: Option<String>,

    /// Command to type, after `--`
    #[arg(last = true)]
    pub command: Vec<String>,
}

/// Arguments for `radio all`
#[derive(clap::Args, Debug)]
pub struct RadioAllArgs {
    /// Space-separated agent names
    #[arg(long)]
    pub agents: Option<String>,

    /// Pane index in each agent window
    #[arg(long)]
    pub pane: Option<u32>,

    /// Command to type, after `--`
    #[arg(last = true)]
    pub command: Vec<String>,
}

/// Command groups that take a subcommand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Session,
    Agent,
    Handoff,
    Radio,
}

impl Group {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "session" => Some(Self::Session),
            "agent" => Some(Self::Agent),
            "handoff" => Some(Self::Handoff),
            "radio" => Some(Self::Radio),
            _ => None,
        }
    }

    fn subcommand_noun(self) -> &'static str {
        match self {
            Self::Session => "session subcommand",
            Self::Agent => "agent subcommand",
            Self::Handoff => "handoff op",
            Self::Radio => "radio subcommand",
        }
    }

    fn missing_hint(self) -> &'static str {
        match self {
            Self::Session => "missing subcommand for session (try 'session start')",
            Self::Agent => "missing subcommand for agent (try 'agent add')",
            Self::Handoff => "missing handoff op (open|ack|progress|done)",
            Self::Radio => "missing radio subcommand (send|all)",
        }
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("no command provided")]
    NoCommand,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("unknown {}: {token}", .group.subcommand_noun())]
    UnknownSubcommand { group: Group, token: String },
    #[error("{}", .0.missing_hint())]
    MissingSubcommand(Group),
    #[error("missing command after --")]
    MissingPayload,
    #[error("{0}")]
    Invalid(String),
}

impl CliError {
    /// Whether the usage text should accompany this error
    pub fn shows_usage(&self) -> bool {
        matches!(
            self,
            Self::NoCommand
                | Self::UnknownCommand(_)
                | Self::UnknownSubcommand { .. }
                | Self::MissingSubcommand(_)
                | Self::Invalid(_)
        )
    }
}

/// Outcome of parsing the command line
#[derive(Debug)]
pub enum Parsed {
    Run(Cli),
    /// Help or version text to print before exiting successfully
    Help(String),
}

/// Usage text printed alongside top-level errors
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Parse `args` (program name first), translating clap failures into goose's messages.
pub fn parse<I, T>(args: I) -> Result<Parsed, CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    match Cli::try_parse_from(&args) {
        Ok(cli) => Ok(Parsed::Run(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Ok(Parsed::Help(err.to_string())),
            _ => Err(classify(&err, &args)),
        },
    }
}

fn classify(err: &clap::Error, args: &[String]) -> CliError {
    let (command, subcommand) = command_tokens(args);
    let group = command.and_then(Group::from_token);
    let invalid = match err.get(ContextKind::InvalidSubcommand) {
        Some(ContextValue::String(token)) => Some(token.as_str()),
        _ => None,
    };

    match (err.kind(), invalid, group) {
        (ErrorKind::InvalidSubcommand, Some(token), _) if Some(token) == command => {
            CliError::UnknownCommand(token.to_string())
        }
        (ErrorKind::InvalidSubcommand, Some(token), Some(group)) if Some(token) == subcommand => {
            CliError::UnknownSubcommand {
                group,
                token: token.to_string(),
            }
        }
        (ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand, _, _) => {
            group.map_or(CliError::NoCommand, CliError::MissingSubcommand)
        }
        // Words given without the `--` separator
        (ErrorKind::UnknownArgument | ErrorKind::InvalidSubcommand, _, Some(Group::Radio))
            if matches!(subcommand, Some("send" | "all")) =>
        {
            CliError::MissingPayload
        }
        _ => {
            let rendered = err.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            CliError::Invalid(first_line.trim_start_matches("error: ").to_string())
        }
    }
}

/// The command token and the token right after it, skipping global flags.
fn command_tokens(args: &[String]) -> (Option<&str>, Option<&str>) {
    let mut tokens = args.iter().skip(1).map(String::as_str);

    while let Some(token) = tokens.next() {
        match token {
            "--session" | "--config" => {
                tokens.next();
            }
            t if t.starts_with('-') => {}
            command => return (Some(command), tokens.next()),
        }
    }

    (None, None)
}

/// Everything a command needs: settings, config defaults and a process runner
pub struct Context<E: Executor = SystemExecutor> {
    pub settings: Settings,
    pub config: AppConfig,
    pub runner: ProcessRunner<E>,
}

impl<E: Executor> Context<E> {
    pub fn new(settings: Settings, config: AppConfig, executor: E) -> Self {
        let runner = ProcessRunner::new(executor, &settings);
        Self {
            settings,
            config,
            runner,
        }
    }

    pub fn tmux(&self) -> Tmux<'_, E> {
        Tmux::new(&self.runner)
    }

    pub fn git(&self) -> Git<'_, E> {
        Git::new(&self.runner)
    }
}

/// Load config for `cli` and run its command with `executor`, rooted at `root`.
pub async fn run<E: Executor>(cli: Cli, root: PathBuf, executor: E) -> Result<()> {
    let settings = cli.settings(root);
    let command = cli.command.ok_or(CliError::NoCommand)?;
    let config = AppConfig::load(cli.config.as_deref(), &settings.root)?;
    debug!("Running {:?} with {:?}", command, settings);

    let ctx = Context::new(settings, config, executor);
    execute(command, &ctx).await
}

/// Route a parsed command to its handler
pub async fn execute<E: Executor>(command: Commands, ctx: &Context<E>) -> Result<()> {
    match command {
        Commands::Session { action } => match action.ok_or(CliError::MissingSubcommand(Group::Session))? {
            SessionCommand::Start(args) => session::execute(args, ctx).await,
        },
        Commands::Agent { action } => match action.ok_or(CliError::MissingSubcommand(Group::Agent))? {
            AgentCommand::Add(args) => agent::execute(args, ctx).await,
        },
        Commands::Handoff { op } => {
            let op = op.ok_or(CliError::MissingSubcommand(Group::Handoff))?;
            handoff::execute(op, ctx)
        }
        Commands::Radio { action } => match action.ok_or(CliError::MissingSubcommand(Group::Radio))? {
            RadioCommand::Send(args) => radio::send(args, ctx).await,
            RadioCommand::All(args) => radio::all(args, ctx).await,
        },
    }
}
