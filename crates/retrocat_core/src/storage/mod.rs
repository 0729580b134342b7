//! Storage adapter contract and implementations.
//!
//! # Responsibility
//! - Expose list/read/write over a flat directory of entries.
//! - Keep filesystem details out of repository and service code.
//!
//! # Invariants
//! - `write_entry` replaces the whole target; there is no append or merge.
//! - Every call is a single attempt; nothing retries.

mod fs;
mod memory;

pub use fs::FsStorage;
pub use memory::MemoryStorage;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    NotFound(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NotFound(path.to_path_buf());
        }
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "storage entry not found: {}", path.display()),
            Self::Io { path, source } => write!(f, "storage io error at {}: {source}", path.display()),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Flat read/write/list capability the record repository persists through.
pub trait StorageAdapter {
    /// Lists entry names (not paths) directly inside `dir`.
    fn list_entries(&self, dir: &Path) -> StorageResult<Vec<String>>;
    /// Reads the full content of one entry.
    fn read_entry(&self, path: &Path) -> StorageResult<Vec<u8>>;
    /// Overwrites one entry with `bytes`.
    fn write_entry(&self, path: &Path, bytes: &[u8]) -> StorageResult<()>;
}

impl<S: StorageAdapter + ?Sized> StorageAdapter for &S {
    fn list_entries(&self, dir: &Path) -> StorageResult<Vec<String>> {
        (**self).list_entries(dir)
    }

    fn read_entry(&self, path: &Path) -> StorageResult<Vec<u8>> {
        (**self).read_entry(path)
    }

    fn write_entry(&self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        (**self).write_entry(path, bytes)
    }
}
