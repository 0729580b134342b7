//! Core domain logic for retrocat, the application review board.
//! This crate owns record identity, review-state rules and persistence.

pub mod board;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod taxonomy;

pub use board::{Board, Card, Column};
pub use config::{CategorizePolicy, StoreConfig, DEFAULT_DATA_DIR};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::application::{
    ApplicantAddress, ApplicantType, Application, ApplicationValidationError, CategoryState,
    ContributionLink, FundingAmount, FundingSource, ImpactMetric,
};
pub use repo::application_repo::{
    encode_application, ApplicationRepository, FileApplicationRepository, RepoError, RepoResult,
    RECORD_FILE_SUFFIX,
};
pub use service::record_store::{RecordStore, StoreError, StoreResult};
pub use storage::{FsStorage, MemoryStorage, StorageAdapter, StorageError, StorageResult};
pub use taxonomy::{Taxonomy, TaxonomyError, TaxonomyValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
