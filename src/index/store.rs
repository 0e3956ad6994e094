//! Index persistence: lazy loading and atomic, backup-preserving writes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::index::error::IndexError;
use crate::index::record::IndexRecord;

/// File-backed search index over locally built data packages.
///
/// The index exclusively owns its in-memory mapping. Mutation happens in
/// memory only and is flushed by an explicit [`write`](Self::write); there is
/// no auto-flush. Callers construct the store and pass it around — there is
/// no process-wide instance.
#[derive(Debug)]
pub struct SearchIndex {
    path: PathBuf,
    db: Option<BTreeMap<String, IndexRecord>>,
}

impl SearchIndex {
    /// Create an index around a backing file without touching the disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), db: None }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the backing file if it has not been loaded yet.
    ///
    /// A missing file reads as an empty index. A file that exists but does
    /// not decode is fatal and surfaces as [`IndexError::Corrupt`].
    pub fn open(&mut self) -> Result<(), IndexError> {
        if self.db.is_some() {
            return Ok(());
        }

        let db = match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|source| IndexError::Corrupt { path: self.path.clone(), source })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(IndexError::Io { action: "read", path: self.path.clone(), source });
            }
        };

        self.db = Some(db);
        Ok(())
    }

    /// Safely write the index data to the backing file.
    ///
    /// Serializes to `<path>.new`, copies any existing live file to
    /// `<path>.bak`, then renames the new file over the live one. A reader
    /// never observes a partially written index, and the previous version
    /// stays recoverable from the backup until the next write. Concurrent
    /// writers are not excluded; the last rename wins.
    pub fn write(&mut self) -> Result<(), IndexError> {
        let json = serde_json::to_string_pretty(self.db()?)
            .map_err(|source| IndexError::Encode { source })?;

        let new_path = sibling(&self.path, ".new");
        let bak_path = sibling(&self.path, ".bak");

        fs::write(&new_path, json)
            .map_err(|source| IndexError::Io { action: "write", path: new_path.clone(), source })?;

        if self.path.exists() {
            fs::copy(&self.path, &bak_path).map_err(|source| IndexError::Io {
                action: "back up",
                path: self.path.clone(),
                source,
            })?;
        }

        fs::rename(&new_path, &self.path).map_err(|source| IndexError::Io {
            action: "replace",
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }

    /// Reset the mapping to empty and persist immediately.
    pub fn clear(&mut self) -> Result<(), IndexError> {
        self.db = Some(BTreeMap::new());
        self.write()
    }

    pub(crate) fn db(&mut self) -> Result<&BTreeMap<String, IndexRecord>, IndexError> {
        self.open()?;
        Ok(self.db.get_or_insert_with(BTreeMap::new))
    }

    pub(crate) fn db_mut(&mut self) -> Result<&mut BTreeMap<String, IndexRecord>, IndexError> {
        self.open()?;
        Ok(self.db.get_or_insert_with(BTreeMap::new))
    }
}

/// Append a suffix to a path: `index.json` + `.bak` → `index.json.bak`.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::index::record::{IdentAlias, IndexRecord};

    fn index_in(dir: &TempDir) -> SearchIndex {
        SearchIndex::new(dir.path().join("index.json"))
    }

    #[test]
    fn test_open_missing_file_is_empty_index() {
        let dir = TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.open().unwrap();
        assert!(index.db().unwrap().is_empty());
    }

    #[test]
    fn test_open_corrupt_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.json"), "{not json").unwrap();

        let mut index = index_in(&dir);
        let err = index.open().unwrap_err();
        assert!(matches!(err, IndexError::Corrupt { .. }));
    }

    #[test]
    fn test_write_round_trips_mapping() {
        let dir = TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.db_mut().unwrap().insert(
            "id-1".to_string(),
            IndexRecord::Ident(IdentAlias { nvname: "acme-survey".to_string() }),
        );
        index.write().unwrap();

        let mut reopened = index_in(&dir);
        reopened.open().unwrap();
        assert_eq!(reopened.db().unwrap(), index.db().unwrap());
    }

    #[test]
    fn test_write_preserves_previous_version_as_backup() {
        let dir = TempDir::new().unwrap();
        let mut index = index_in(&dir);

        index.db_mut().unwrap().insert(
            "id-1".to_string(),
            IndexRecord::Ident(IdentAlias { nvname: "first".to_string() }),
        );
        index.write().unwrap();
        let first = fs::read_to_string(dir.path().join("index.json")).unwrap();

        index.db_mut().unwrap().insert(
            "id-2".to_string(),
            IndexRecord::Ident(IdentAlias { nvname: "second".to_string() }),
        );
        index.write().unwrap();

        let backup = fs::read_to_string(dir.path().join("index.json.bak")).unwrap();
        assert_eq!(backup, first);
        assert_ne!(fs::read_to_string(dir.path().join("index.json")).unwrap(), first);
    }

    #[test]
    fn test_write_leaves_no_staging_file_behind() {
        let dir = TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.write().unwrap();
        assert!(dir.path().join("index.json").exists());
        assert!(!dir.path().join("index.json.new").exists());
    }

    #[test]
    fn test_clear_resets_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut index = index_in(&dir);
        index.db_mut().unwrap().insert(
            "id-1".to_string(),
            IndexRecord::Ident(IdentAlias { nvname: "acme-survey".to_string() }),
        );
        index.write().unwrap();

        index.clear().unwrap();

        let mut reopened = index_in(&dir);
        reopened.open().unwrap();
        assert!(reopened.db().unwrap().is_empty());
    }
}
