//! On-disk state: current snapshots, history artifacts and change ledgers.
//!
//! Layout under the base directory:
//!
//! ```text
//! current/<slug>.json                          latest snapshot, overwritten every run
//! history/<slug>/<YYYY-MM-DD_HH-MM-SS>.json    one artifact per detected change (UTC)
//! changes/<slug>_changes.json                  bounded change ledger
//! ```
//!
//! Every write goes through a temp file + rename. There is no locking; a single
//! writer per company is assumed (see [`crate::tracker::EntityLocks`]).

mod current;
mod doc;
mod history;
mod ledger;

pub use current::SnapshotStore;
pub use history::HistoryLog;
pub use ledger::ChangeLedgerStore;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::changes::{ChangeLedger, ChangeLedgerEntry, ChangeResult};
use crate::core::{IsError, Snapshot, StorageConfig};

/// UTC timestamp format for history file names and ledger entries.
pub const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Slugs become file names, so anything that could escape the store directory is rejected.
fn file_stem(entity: &str) -> Result<&str, IsError> {
    let ok = !entity.is_empty()
        && entity != "."
        && entity != ".."
        && !entity
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0') || c.is_control());
    if ok {
        Ok(entity)
    } else {
        Err(IsError::Data(format!("invalid entity key: {entity:?}")))
    }
}

/// The three stores of one data directory, wired together.
#[derive(Debug, Clone)]
pub struct DataStore {
    base_dir: PathBuf,
    current: SnapshotStore,
    history: HistoryLog,
    ledger: ChangeLedgerStore,
}

impl DataStore {
    /// Open (and create, if needed) the store layout under `config.base_dir`.
    pub fn open(config: &StorageConfig) -> Result<Self, IsError> {
        let base_dir = config.base_dir.clone();
        let store = Self {
            current: SnapshotStore::new(base_dir.join("current")),
            history: HistoryLog::new(base_dir.join("history")),
            ledger: ChangeLedgerStore::new(base_dir.join("changes"), config.max_change_history),
            base_dir,
        };
        for dir in [store.current.dir(), store.history.dir(), store.ledger.dir()] {
            doc::ensure_dir(dir)?;
        }
        debug!("Data store initialized with base_dir: {}", store.base_dir.display());
        Ok(store)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn current(&self) -> &SnapshotStore {
        &self.current
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn ledger(&self) -> &ChangeLedgerStore {
        &self.ledger
    }

    pub fn load_current(&self, entity: &str) -> Result<Option<Snapshot>, IsError> {
        self.current.load(entity)
    }

    pub fn change_history(&self, entity: &str) -> Result<Option<ChangeLedger>, IsError> {
        self.ledger.read(entity)
    }

    /// Persist a scrape result: always refresh the current snapshot, and when
    /// `changes.has_changes` also append a history artifact and a ledger entry.
    ///
    /// Returns the path of the current snapshot. If the history or ledger write
    /// fails after the current snapshot was replaced, the error is returned and
    /// the stores are left as they are.
    pub fn save_data(
        &self,
        entity: &str,
        snapshot: &Snapshot,
        changes: &ChangeResult,
    ) -> Result<PathBuf, IsError> {
        self.save_data_at(entity, snapshot, changes, &Utc::now())
    }

    /// [`DataStore::save_data`] with an explicit write time.
    pub fn save_data_at(
        &self,
        entity: &str,
        snapshot: &Snapshot,
        changes: &ChangeResult,
        now: &DateTime<Utc>,
    ) -> Result<PathBuf, IsError> {
        let current = self.current.save(entity, snapshot)?;
        info!("Saved current data for {entity}");

        if changes.has_changes {
            self.history.append(entity, snapshot, now)?;
            info!("Created historical snapshot for {entity}");

            let entry = ChangeLedgerEntry::from_change(
                now.format(STAMP_FORMAT).to_string(),
                snapshot.scraped_at.to_rfc3339(),
                changes,
            );
            self.ledger.append(entity, entry)?;
        }

        Ok(current)
    }
}
