// ABOUTME: Configuration for goose
// Per-invocation settings from global flags plus optional TOML defaults

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the project-local config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".goose.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config from {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Global flags for one invocation. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Print actions without executing them
    pub dry_run: bool,
    /// Echo external commands and file appends
    pub verbose: bool,
    /// Explicit tmux session name, if any
    pub session: Option<String>,
    /// Directory relative paths and child processes resolve against
    pub root: PathBuf,
}

impl Settings {
    /// The configured session name, ignoring an empty override.
    pub fn session_name(&self) -> Option<&str> {
        self.session.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Defaults for `session start`
    #[serde(default)]
    pub session: SessionDefaults,

    /// Defaults for `agent add`
    #[serde(default)]
    pub agent: AgentDefaults,

    /// Defaults for `radio all`
    #[serde(default)]
    pub radio: RadioDefaults,

    /// Handoff file locations
    #[serde(default)]
    pub handoff: HandoffDefaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionDefaults {
    /// Editor launched in pane 0 of the lead and goose windows
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Session name used when the repo path has no usable base name
    #[serde(default = "default_fallback_name")]
    pub fallback_name: String,

    /// Refresh interval of the ops window watcher
    #[serde(default = "default_ops_interval")]
    pub ops_interval_secs: u64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            fallback_name: default_fallback_name(),
            ops_interval_secs: default_ops_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefaults {
    /// Branch new agent branches fork from
    #[serde(default = "default_base_branch")]
    pub base: String,

    /// Parent directory of agent worktrees
    #[serde(default = "default_worktree_dir")]
    pub worktree_dir: String,

    /// Prefix of agent branch names
    #[serde(default = "default_branch_prefix")]
    pub branch_prefix: String,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            base: default_base_branch(),
            worktree_dir: default_worktree_dir(),
            branch_prefix: default_branch_prefix(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RadioDefaults {
    /// Agents addressed by `radio all` without `--agents`
    #[serde(default = "default_radio_agents")]
    pub agents: Vec<String>,

    /// Pane index addressed in each agent window
    #[serde(default = "default_radio_pane")]
    pub pane: u32,
}

impl Default for RadioDefaults {
    fn default() -> Self {
        Self {
            agents: default_radio_agents(),
            pane: default_radio_pane(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandoffDefaults {
    /// Directory holding inbox.md and outbox/
    #[serde(default = "default_handoff_dir")]
    pub dir: String,
}

impl Default for HandoffDefaults {
    fn default() -> Self {
        Self {
            dir: default_handoff_dir(),
        }
    }
}

fn default_editor() -> String {
    "nvim".to_string()
}

fn default_fallback_name() -> String {
    "flight".to_string()
}

fn default_ops_interval() -> u64 {
    5
}

fn default_base_branch() -> String {
    "dev".to_string()
}

fn default_worktree_dir() -> String {
    "personas".to_string()
}

fn default_branch_prefix() -> String {
    "agent".to_string()
}

fn default_radio_agents() -> Vec<String> {
    vec!["goose".to_string()]
}

fn default_radio_pane() -> u32 {
    1
}

fn default_handoff_dir() -> String {
    "handoffs".to_string()
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the first existing file among
    /// `<root>/.goose.toml` and `<config_dir>/goose/config.toml` is used, and
    /// built-in defaults apply when neither exists.
    pub fn load(explicit: Option<&Path>, root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(&root.join(path));
        }

        for path in Self::config_paths(root) {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Parse a single TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Candidate config files in order of precedence
    fn config_paths(root: &Path) -> Vec<PathBuf> {
        let mut paths = vec![root.join(PROJECT_CONFIG_FILE)];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("goose").join("config.toml"));
        }

        paths
    }
}
