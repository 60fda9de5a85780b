// ── File-backed session store ──
//
// The session mirror as a flat TOML table of strings. Each `set` re-reads
// the file, merges its one value and rewrites the whole table through a
// sibling temp file and a rename. Writes from another process between two
// `set` calls are kept; two processes writing at the same instant are not
// serialized, and the last rename wins.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use tvlink_core::{SessionStore, StoreError};

/// Durable [`SessionStore`] persisted as a TOML file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// and its parent directories are created on the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = read_table(&path)?.unwrap_or_default();

        debug!(path = %path.display(), entries = values.len(), "session store opened");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            toml::to_string_pretty(values).map_err(|e| StoreError::Malformed(e.to_string()))?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// `Ok(None)` when the file does not exist yet.
fn read_table(path: &Path) -> Result<Option<BTreeMap<String, String>>, StoreError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Malformed(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl SessionStore for FileStore {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(name).cloned())
    }

    fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(on_disk) = read_table(&self.path)? {
            *values = on_disk;
        }
        values.insert(name.to_owned(), value.to_owned());
        self.flush(&values)
    }
}
