// ABOUTME: Append-only writer for the handoff inbox and per-agent outboxes

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use super::{HandoffError, HandoffNote, HandoffOp};
use crate::config::Settings;

pub struct HandoffLog {
    root: PathBuf,
    /// Handoff directory relative to `root`
    dir: PathBuf,
    dry_run: bool,
    verbose: bool,
}

impl HandoffLog {
    pub fn new(settings: &Settings, dir: impl AsRef<Path>) -> Self {
        Self {
            root: settings.root.clone(),
            dir: dir.as_ref().to_path_buf(),
            dry_run: settings.dry_run,
            verbose: settings.verbose,
        }
    }

    /// Shared inbox, relative to the root
    pub fn inbox_path(&self) -> PathBuf {
        self.dir.join("inbox.md")
    }

    /// Directory holding per-agent outboxes, relative to the root
    pub fn outbox_dir(&self) -> PathBuf {
        self.dir.join("outbox")
    }

    /// Outbox file for an upper-cased agent tag, relative to the root
    pub fn outbox_path(&self, agent_tag: &str) -> PathBuf {
        self.outbox_dir().join(format!("{agent_tag}.md"))
    }

    /// File a note is appended to
    pub fn destination(&self, note: &HandoffNote) -> PathBuf {
        match note.op {
            HandoffOp::Open => self.inbox_path(),
            _ => self.outbox_path(&note.agent_tag()),
        }
    }

    /// Append `note` dated `date`, returning the file written (relative to the root).
    ///
    /// The outbox directory is created for every op; under dry-run nothing on
    /// disk changes and the content is only printed.
    pub fn record(&self, note: &HandoffNote, date: NaiveDate) -> Result<PathBuf, HandoffError> {
        let path = self.destination(note);
        let content = note.render(date);

        if self.verbose || self.dry_run {
            print!("append {}:\n{}", path.display(), content);
        }
        if self.dry_run {
            return Ok(path);
        }

        fs::create_dir_all(self.root.join(self.outbox_dir()))?;
        append(&self.root.join(&path), &content)?;

        debug!("Appended {} entry for {} to {}", note.op, note.task, path.display());
        Ok(path)
    }
}

fn append(path: &Path, content: &str) -> std::io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content.as_bytes())?;
    writer.flush()
}
