use std::path::{Path, PathBuf};

use tracing::debug;

use super::doc;
use crate::core::{IsError, Snapshot};

/// The latest snapshot of each company, one file per company, overwritten on every run.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the current snapshot of `entity` lives.
    pub fn path_for(&self, entity: &str) -> Result<PathBuf, IsError> {
        Ok(self.dir.join(format!("{}.json", super::file_stem(entity)?)))
    }

    /// The most recently saved snapshot, or `None` on first observation.
    pub fn load(&self, entity: &str) -> Result<Option<Snapshot>, IsError> {
        let path = self.path_for(entity)?;
        let snapshot: Option<Snapshot> = doc::read_json(&path)?;
        match &snapshot {
            Some(_) => debug!("Loaded current data for {entity}"),
            None => debug!("No current data found for {entity}"),
        }
        Ok(snapshot)
    }

    /// Replace the current snapshot unconditionally and return its location.
    pub fn save(&self, entity: &str, snapshot: &Snapshot) -> Result<PathBuf, IsError> {
        let path = self.path_for(entity)?;
        doc::write_json_atomic(&path, snapshot)?;
        Ok(path)
    }
}
