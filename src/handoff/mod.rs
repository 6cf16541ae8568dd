// ABOUTME: Handoff notes exchanged between agents through append-only files
//
// - inbox.md: shared log, one OPEN block per task
// - outbox/<AGENT>.md: per-agent log, one line per ACK/PROGRESS/DONE

pub mod entry;
pub mod log;

pub use entry::{HandoffNote, HandoffOp};
pub use log::HandoffLog;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("{0} is required")]
    MissingFlag(&'static str),
    #[error("--branch is required for {0}")]
    MissingBranch(HandoffOp),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
