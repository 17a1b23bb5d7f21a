//! Pretty-printed JSON documents on disk.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::IsError;

/// Create `dir` (and parents) if it does not exist yet.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), IsError> {
    fs::create_dir_all(dir).map_err(|e| IsError::io(dir, e))
}

/// Read and decode a document; a missing file is `Ok(None)`.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, IsError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(IsError::io(path, e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| IsError::json(path, e))
}

/// Write a document so that readers see either the old or the new file, never a prefix.
///
/// The content goes to a sibling `*.tmp` file that is synced and then renamed over `path`.
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), IsError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| IsError::json(path, e))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let tmp = tmp_path(path);
    let write = || -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    };

    write().map_err(|e| {
        let _ = fs::remove_file(&tmp);
        IsError::io(path, e)
    })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
