//! In-process storage for tests and dry runs.
//!
//! Entries live in a path-keyed map. Writes can be switched off to exercise
//! failure paths of callers.

use super::{StorageAdapter, StorageError, StorageResult};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    writes_fail: Cell<bool>,
    write_count: Cell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds or replaces one entry without counting it as a write.
    pub fn insert(&self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.entries.borrow_mut().insert(path.into(), bytes.into());
    }

    /// Returns a copy of one entry, if present.
    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        self.entries.borrow().get(path).cloned()
    }

    /// Makes every following `write_entry` fail with a permission error.
    pub fn fail_writes(&self, fail: bool) {
        self.writes_fail.set(fail);
    }

    /// Number of successful `write_entry` calls so far.
    pub fn write_count(&self) -> usize {
        self.write_count.get()
    }
}

impl StorageAdapter for MemoryStorage {
    fn list_entries(&self, dir: &Path) -> StorageResult<Vec<String>> {
        Ok(self
            .entries
            .borrow()
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name())
            .filter_map(|name| name.to_str().map(str::to_string))
            .collect())
    }

    fn read_entry(&self, path: &Path) -> StorageResult<Vec<u8>> {
        self.entries
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_path_buf()))
    }

    fn write_entry(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if self.writes_fail.get() {
            return Err(StorageError::io(
                path,
                std::io::Error::new(ErrorKind::PermissionDenied, "writes disabled"),
            ));
        }
        self.entries
            .borrow_mut()
            .insert(path.to_path_buf(), bytes.to_vec());
        self.write_count.set(self.write_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryStorage;
    use crate::storage::{StorageAdapter, StorageError};
    use std::path::Path;

    #[test]
    fn lists_only_direct_children() {
        let storage = MemoryStorage::new();
        storage.insert("data/a.json", "{}");
        storage.insert("data/nested/b.json", "{}");
        storage.insert("other/c.json", "{}");

        let names = storage.list_entries(Path::new("data")).unwrap();
        assert_eq!(names, vec!["a.json".to_string()]);
    }

    #[test]
    fn failing_writes_leave_entries_untouched() {
        let storage = MemoryStorage::new();
        storage.insert("data/a.json", "old");
        storage.fail_writes(true);

        let err = storage
            .write_entry(Path::new("data/a.json"), b"new")
            .unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(storage.get(Path::new("data/a.json")).unwrap(), b"old");
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn missing_entry_is_not_found() {
        let storage = MemoryStorage::new();
        let err = storage.read_entry(Path::new("data/x.json")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
