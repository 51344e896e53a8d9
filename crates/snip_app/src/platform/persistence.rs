//! Durable history slot: one JSON document, rewritten in full on every change.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snip_core::{EntryId, History, HistoryEntry};
use snip_engine::{AtomicFileWriter, PersistError};
use snip_logging::{snip_debug, snip_info, snip_warn};
use thiserror::Error;

const HISTORY_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum HistoryStoreError {
    #[error("history path {0:?} has no file name")]
    InvalidPath(PathBuf),
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntry {
    id: u64,
    original_url: String,
    short_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedHistory {
    version: u32,
    /// Newest first.
    #[serde(default)]
    entries: Vec<PersistedEntry>,
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored history. Missing, unreadable or corrupt files all
    /// yield an empty history; the problem is logged, never returned.
    pub fn load(&self) -> History {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                snip_debug!("No history at {:?}; starting empty", self.path);
                return History::new();
            }
            Err(err) => {
                snip_warn!("Failed to read history from {:?}: {}", self.path, err);
                return History::new();
            }
        };

        let stored: PersistedHistory = match serde_json::from_str(&content) {
            Ok(stored) => stored,
            Err(err) => {
                snip_warn!("Failed to parse history from {:?}: {}", self.path, err);
                return History::new();
            }
        };
        if stored.version != HISTORY_VERSION {
            snip_warn!(
                "Unsupported history version {} in {:?}; starting empty",
                stored.version,
                self.path
            );
            return History::new();
        }

        let stored_len = stored.entries.len();
        let history = History::from_entries(
            stored
                .entries
                .into_iter()
                .map(|entry| HistoryEntry::new(EntryId(entry.id), entry.original_url, entry.short_url))
                .collect(),
        );
        if history.len() != stored_len {
            snip_warn!(
                "Dropped {} history entries with duplicate ids",
                stored_len - history.len()
            );
        }

        snip_info!("Loaded {} history entries from {:?}", history.len(), self.path);
        history
    }

    /// Overwrites the stored history with `history`, in order.
    pub fn save(&self, history: &History) -> Result<(), HistoryStoreError> {
        let filename = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| HistoryStoreError::InvalidPath(self.path.clone()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let stored = PersistedHistory {
            version: HISTORY_VERSION,
            entries: history
                .iter()
                .map(|entry| PersistedEntry {
                    id: entry.id.0,
                    original_url: entry.original_url.clone(),
                    short_url: entry.short_url.clone(),
                })
                .collect(),
        };
        let content = serde_json::to_string_pretty(&stored)?;

        AtomicFileWriter::new(dir).write(filename, &content)?;
        snip_debug!("Saved {} history entries to {:?}", history.len(), self.path);
        Ok(())
    }
}
