use std::path::{Path, PathBuf};

use tracing::debug;

use super::doc;
use crate::changes::{ChangeLedger, ChangeLedgerEntry};
use crate::core::IsError;

/// Bounded change log per company. Entries beyond the bound are dropped oldest
/// first and are not archived anywhere else.
#[derive(Debug, Clone)]
pub struct ChangeLedgerStore {
    dir: PathBuf,
    max_entries: usize,
}

impl ChangeLedgerStore {
    pub fn new(dir: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            dir: dir.into(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn path_for(&self, entity: &str) -> Result<PathBuf, IsError> {
        Ok(self
            .dir
            .join(format!("{}_changes.json", super::file_stem(entity)?)))
    }

    /// Append `entry` to the ledger of `entity`, trimming it to the configured bound.
    pub fn append(&self, entity: &str, entry: ChangeLedgerEntry) -> Result<PathBuf, IsError> {
        let path = self.path_for(entity)?;
        let mut ledger: ChangeLedger =
            doc::read_json(&path)?.unwrap_or_else(|| ChangeLedger::empty(entity));
        ledger.push_bounded(entry, self.max_entries);
        doc::write_json_atomic(&path, &ledger)?;
        debug!(
            "Updated change log for {entity} ({} entries)",
            ledger.changes.len()
        );
        Ok(path)
    }

    /// The ledger of `entity`, or `None` if no change was ever recorded.
    pub fn read(&self, entity: &str) -> Result<Option<ChangeLedger>, IsError> {
        doc::read_json(&self.path_for(entity)?)
    }
}
