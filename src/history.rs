//! Playback history store
//!
//! A capped, URL-deduplicated, most-recent-first journal of played
//! items, persisted as a JSON list in a single file. Storage failures
//! are absorbed: reads degrade to empty, writes no-op.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::HistoryEntry;

/// Journal cap; the oldest entry past it is evicted
pub const HISTORY_CAP: usize = 100;

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the per-install state directory
    pub fn default_location() -> Self {
        let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("flixdir");
        fs::create_dir_all(&path).ok();
        path.push("history.json");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current journal, most recent first. A missing or corrupt file
    /// reads as empty.
    pub fn list(&self) -> Vec<HistoryEntry> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("history file unreadable, treating as empty: {}", e);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    /// Record a play. Re-playing a URL moves its entry to the front with
    /// the new title and timestamp instead of duplicating it.
    pub fn record(&self, title: &str, url: &str, icon: &str) {
        let mut entries = self.list();
        entries.retain(|entry| entry.url != url);
        entries.insert(
            0,
            HistoryEntry {
                title: title.to_string(),
                url: url.to_string(),
                icon: icon.to_string(),
                time: chrono::Utc::now().timestamp(),
            },
        );
        entries.truncate(HISTORY_CAP);
        self.persist(&entries);
    }

    /// Delete the journal; a subsequent [`list`](Self::list) is empty
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("failed to clear history: {}", e);
            }
        }
    }

    // Write-then-rename so a partial write never clobbers the previous
    // valid journal.
    fn persist(&self, entries: &[HistoryEntry]) {
        let content = match serde_json::to_string_pretty(entries) {
            Ok(content) => content,
            Err(_) => return,
        };
        let tmp = self.path.with_extension("json.tmp");
        let written = fs::write(&tmp, content).and_then(|_| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            log::warn!("failed to persist history to {}: {}", self.path.display(), e);
        }
    }
}
