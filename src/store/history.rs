use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{STAMP_FORMAT, doc};
use crate::core::{IsError, Snapshot};

/// Append-only archive of snapshots that changed, one directory per company and
/// one file per change, named by UTC time with second resolution.
///
/// UTC names never repeat when local clocks fall back, and they sort
/// chronologically. Two appends within the same second share a name; the
/// later one wins.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    dir: PathBuf,
}

impl HistoryLog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entity_dir(&self, entity: &str) -> Result<PathBuf, IsError> {
        Ok(self.dir.join(super::file_stem(entity)?))
    }

    /// Write `snapshot` as a new artifact stamped with `at`.
    pub fn append(
        &self,
        entity: &str,
        snapshot: &Snapshot,
        at: &DateTime<Utc>,
    ) -> Result<PathBuf, IsError> {
        let dir = self.entity_dir(entity)?;
        doc::ensure_dir(&dir)?;
        let path = dir.join(format!("{}.json", at.format(STAMP_FORMAT)));
        doc::write_json_atomic(&path, snapshot)?;
        Ok(path)
    }

    /// All artifacts of `entity`, oldest first. Empty if none were written yet.
    pub fn list(&self, entity: &str) -> Result<Vec<PathBuf>, IsError> {
        let dir = self.entity_dir(entity)?;
        let entries = match fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(IsError::io(&dir, e)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| IsError::io(&dir, e))?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Load a single artifact returned by [`HistoryLog::list`] or [`HistoryLog::append`].
    pub fn read(&self, path: &Path) -> Result<Snapshot, IsError> {
        doc::read_json(path)?.ok_or_else(|| {
            IsError::io(path, std::io::Error::from(ErrorKind::NotFound))
        })
    }
}
