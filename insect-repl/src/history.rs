//! Persistent input history

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use crate::error::{ReplError, ReplResult};

/// Reads and appends the history file behind the line editor
#[derive(Debug, Clone)]
pub struct HistoryManager {
    /// Path to history file, history is disabled without one
    history_file: Option<PathBuf>,
    /// Maximum number of entries loaded
    max_entries: usize,
}

impl HistoryManager {
    pub fn new(history_file: Option<PathBuf>, max_entries: usize) -> Self {
        Self {
            history_file,
            max_entries,
        }
    }

    /// The most recent `max_entries` entries, oldest first
    pub fn load(&self) -> ReplResult<Vec<String>> {
        let Some(path) = &self.history_file else {
            return Ok(Vec::new());
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let entries: Vec<String> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(String::from)
            .collect();
        let start = entries.len().saturating_sub(self.max_entries);
        Ok(entries[start..].to_vec())
    }

    /// Append a single entry, creating the file and its directory as needed
    pub fn append(&self, entry: &str) -> ReplResult<()> {
        let Some(path) = &self.history_file else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                ReplError::History(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}
