use std::path::PathBuf;

use crate::io::journal;
use crate::io::storage::Storage;
use crate::model::task::Task;

/// The one well-known key the collection lives under.
pub const TASKS_KEY: &str = "tasks";

/// Error from a failed persist. Loading never fails — absent or
/// undecodable state falls back to an empty collection.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not encode tasks: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("could not write \"{key}\": {source}")]
    Write {
        key: &'static str,
        source: std::io::Error,
    },
}

/// Mirrors the task collection to durable storage.
///
/// Full-overwrite strategy: every committed transition re-encodes and
/// rewrites the whole collection under `TASKS_KEY`.
pub struct PersistenceBridge {
    storage: Box<dyn Storage>,
    /// Where failure entries are journaled; absent in unit tests.
    journal_dir: Option<PathBuf>,
}

impl PersistenceBridge {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        PersistenceBridge {
            storage,
            journal_dir: None,
        }
    }

    pub fn with_journal(storage: Box<dyn Storage>, journal_dir: impl Into<PathBuf>) -> Self {
        PersistenceBridge {
            storage,
            journal_dir: Some(journal_dir.into()),
        }
    }

    /// Restore the persisted collection.
    ///
    /// Absent key: empty collection. Undecodable payload: empty collection,
    /// with the raw payload captured in the journal first so the bytes are
    /// not silently lost. Neither case is an error.
    pub fn load(&self) -> Vec<Task> {
        let Some(text) = self.storage.get(TASKS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&text) {
            Ok(tasks) => tasks,
            Err(e) => {
                if let Some(dir) = &self.journal_dir {
                    journal::log_decode_failure(dir, TASKS_KEY, &e.to_string(), &text);
                }
                Vec::new()
            }
        }
    }

    /// Write the full collection back under `TASKS_KEY`.
    ///
    /// On write failure the serialized payload is journaled before the
    /// error propagates, so the caller can report and carry on.
    pub fn persist(&mut self, tasks: &[Task]) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(tasks)?;
        if let Err(e) = self.storage.set(TASKS_KEY, &text) {
            if let Some(dir) = &self.journal_dir {
                journal::log_write_failure(dir, TASKS_KEY, &e, &text);
            }
            return Err(StorageError::Write {
                key: TASKS_KEY,
                source: e,
            });
        }
        Ok(())
    }

    /// Drop the persisted collection entirely.
    pub fn clear(&mut self) -> std::io::Result<()> {
        self.storage.remove(TASKS_KEY)
    }
}
