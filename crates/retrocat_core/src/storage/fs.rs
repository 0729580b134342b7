//! Local filesystem storage.
//!
//! # Invariants
//! - `list_entries` returns regular files only, sorted by name.
//! - Non UTF-8 file names are skipped; they can never match a record key.

use super::{StorageAdapter, StorageError, StorageResult};
use log::{debug, warn};
use std::path::Path;

/// Storage adapter backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl FsStorage {
    pub fn new() -> Self {
        Self
    }
}

impl StorageAdapter for FsStorage {
    fn list_entries(&self, dir: &Path) -> StorageResult<Vec<String>> {
        let read_dir = std::fs::read_dir(dir).map_err(|err| StorageError::io(dir, err))?;
        let mut names = Vec::new();

        for entry in read_dir {
            let entry = entry.map_err(|err| StorageError::io(dir, err))?;
            let file_type = entry
                .file_type()
                .map_err(|err| StorageError::io(&entry.path(), err))?;
            if !file_type.is_file() {
                debug!(
                    "event=storage_list module=storage status=skip reason=not_file entry={}",
                    entry.path().display()
                );
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => warn!(
                    "event=storage_list module=storage status=skip reason=non_utf8 entry={:?}",
                    raw
                ),
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_entry(&self, path: &Path) -> StorageResult<Vec<u8>> {
        std::fs::read(path).map_err(|err| StorageError::io(path, err))
    }

    fn write_entry(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        std::fs::write(path, bytes).map_err(|err| StorageError::io(path, err))
    }
}
