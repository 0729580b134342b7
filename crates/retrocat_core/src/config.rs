//! Record store configuration.
//!
//! # Invariants
//! - `data_dir` is the only directory records are read from or written to.

use std::path::PathBuf;

/// Relative data directory used when the caller supplies none.
pub const DEFAULT_DATA_DIR: &str = "data";

/// How assigning a category treats an existing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorizePolicy {
    /// Assigning a category clears flag and reason, so a record is exactly one
    /// of uncategorized, categorized or flagged.
    #[default]
    ClearFlag,
    /// Assigning a category leaves flag and reason in place.
    KeepFlag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub policy: CategorizePolicy,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            policy: CategorizePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CategorizePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
