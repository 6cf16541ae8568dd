// ABOUTME: Radio: type a command line into one or more agent panes

use thiserror::Error;
use tracing::debug;

use crate::exec::{ExecError, Executor};
use crate::tmux::{pane, qualify_target, Tmux};

#[derive(Error, Debug)]
pub enum RadioError {
    #[error("--target is required")]
    MissingTarget,
    #[error("missing command after --")]
    MissingPayload,
    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Join the words after `--` into the literal keystrokes to send.
pub fn payload(words: &[String]) -> Result<String, RadioError> {
    if words.is_empty() {
        return Err(RadioError::MissingPayload);
    }
    Ok(words.join(" "))
}

/// Agents named in a whitespace-separated list, or `defaults` when the list is absent or blank.
pub fn roster(agents: Option<&str>, defaults: &[String]) -> Vec<String> {
    let named: Vec<String> = agents
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if named.is_empty() {
        defaults.to_vec()
    } else {
        named
    }
}

/// Send `payload` followed by Enter to a single pane.
pub async fn send<E: Executor>(
    tmux: &Tmux<'_, E>,
    session: Option<&str>,
    target: Option<&str>,
    payload: &str,
) -> Result<String, RadioError> {
    let target = target
        .filter(|t| !t.is_empty())
        .ok_or(RadioError::MissingTarget)?;
    let target = qualify_target(session, target);

    tmux.send_line(&target, payload).await?;
    Ok(target)
}

/// Send `payload` to pane `pane_index` of every agent window, in order.
///
/// Stops at the first failed delivery; later agents are not contacted.
pub async fn broadcast<E: Executor>(
    tmux: &Tmux<'_, E>,
    session: Option<&str>,
    agents: &[String],
    pane_index: u32,
    payload: &str,
) -> Result<Vec<String>, RadioError> {
    let mut delivered = Vec::with_capacity(agents.len());

    for agent in agents {
        let target = qualify_target(session, &pane(agent, pane_index));
        tmux.send_line(&target, payload).await?;
        debug!("Radioed {}", target);
        delivered.push(target);
    }

    Ok(delivered)
}
