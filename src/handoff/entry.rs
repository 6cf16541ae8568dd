// ABOUTME: Handoff note validation and rendering

use std::fmt;

use chrono::NaiveDate;

use super::HandoffError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffOp {
    Open,
    Ack,
    Progress,
    Done,
}

impl HandoffOp {
    /// Upper-case status word written into the log
    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Ack => "ACK",
            Self::Progress => "PROGRESS",
            Self::Done => "DONE",
        }
    }

    pub fn requires_branch(self) -> bool {
        matches!(self, Self::Progress | Self::Done)
    }
}

impl fmt::Display for HandoffOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Ack => write!(f, "ack"),
            Self::Progress => write!(f, "progress"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// A validated handoff note, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffNote {
    pub op: HandoffOp,
    pub task: String,
    pub agent: String,
    pub branch: Option<String>,
    pub note: Option<String>,
}

impl HandoffNote {
    /// Check required fields. Empty strings count as missing.
    pub fn new(
        op: HandoffOp,
        task: Option<String>,
        agent: Option<String>,
        branch: Option<String>,
        note: Option<String>,
    ) -> Result<Self, HandoffError> {
        let task = present(task).ok_or(HandoffError::MissingFlag("--task"))?;
        let agent = present(agent).ok_or(HandoffError::MissingFlag("--agent"))?;
        let branch = present(branch);
        if op.requires_branch() && branch.is_none() {
            return Err(HandoffError::MissingBranch(op));
        }

        Ok(Self {
            op,
            task,
            agent,
            branch,
            note: present(note),
        })
    }

    /// Agent name as written in file names and attributions
    pub fn agent_tag(&self) -> String {
        self.agent.to_uppercase()
    }

    /// Text appended to the log for this note, newline-terminated
    pub fn render(&self, date: NaiveDate) -> String {
        let date = date.format("%Y-%m-%d");
        let agent = self.agent_tag();

        match self.op {
            HandoffOp::Open => {
                let mut block = format!("## {} (OPEN)\nby @{}\n", self.task, agent);
                if let Some(note) = &self.note {
                    block.push_str(&format!("note: {note}\n"));
                }
                block.push_str(&format!("created: {date}\n\n"));
                block
            }
            HandoffOp::Ack => format!("[{date}] {} ACK by @{agent}\n", self.task),
            HandoffOp::Progress | HandoffOp::Done => {
                let mut line = format!(
                    "[{date}] {} {} @{agent} branch:{}",
                    self.task,
                    self.op.label(),
                    self.branch.as_deref().unwrap_or_default()
                );
                if let Some(note) = &self.note {
                    line.push_str(&format!(" note:{note}"));
                }
                line.push('\n');
                line
            }
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
