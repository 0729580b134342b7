//! Record store: in-memory application records with write-through persistence.
//!
//! # Responsibility
//! - Load every record once and serve lookups by `applicantAddress`.
//! - Apply reviewer actions (categorize, flag, switch type) and persist each
//!   one immediately as a full-record overwrite.
//!
//! # Invariants
//! - A mutation either lands in memory and in storage, or in neither: a failed
//!   write restores the pre-mutation record.
//! - `pwCategory` only ever holds a label of the record's current type.
//! - Flagging clears the category; switching type clears the category and
//!   keeps the flag.
//! - A failed load leaves the previous collection untouched.

use crate::config::{CategorizePolicy, StoreConfig};
use crate::model::application::{ApplicantType, Application};
use crate::repo::application_repo::{ApplicationRepository, FileApplicationRepository, RepoError};
use crate::storage::FsStorage;
use crate::taxonomy::Taxonomy;
use log::{error, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// No loaded record has this address.
    NotFound(String),
    /// Label is not part of the set for the record's applicant type.
    UnknownCategory {
        address: String,
        applicant_type: ApplicantType,
        label: String,
    },
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(address) => write!(f, "application not found: {address}"),
            Self::UnknownCategory {
                address,
                applicant_type,
                label,
            } => write!(
                f,
                "category `{label}` is not a {applicant_type} category (application {address})"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Explicitly owned record collection plus the repository it syncs with.
pub struct RecordStore<R: ApplicationRepository> {
    repo: R,
    taxonomy: Taxonomy,
    policy: CategorizePolicy,
    records: Vec<Application>,
    index: HashMap<String, usize>,
}

impl RecordStore<FileApplicationRepository<FsStorage>> {
    /// Creates an empty store over the local data directory from `config`.
    ///
    /// Call [`RecordStore::load`] before issuing mutations.
    pub fn open(config: &StoreConfig, taxonomy: Taxonomy) -> Self {
        let repo = FileApplicationRepository::new(FsStorage::new(), config.data_dir.clone());
        Self::new(repo, taxonomy, config.policy)
    }
}

impl<R: ApplicationRepository> RecordStore<R> {
    pub fn new(repo: R, taxonomy: Taxonomy, policy: CategorizePolicy) -> Self {
        Self {
            repo,
            taxonomy,
            policy,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Replaces the in-memory collection with a full read of storage.
    ///
    /// Returns the number of loaded records.
    ///
    /// # Errors
    /// - Any storage, decode or identity error; nothing is installed then.
    pub fn load(&mut self) -> StoreResult<usize> {
        let started_at = Instant::now();
        let records = match self.repo.load_all() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=store_load module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        self.index = records
            .iter()
            .enumerate()
            .map(|(position, app)| (app.applicant_address.clone(), position))
            .collect();
        self.records = records;

        info!(
            "event=store_load module=store status=ok records={} duration_ms={}",
            self.records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(self.records.len())
    }

    /// Sets (`Some`) or clears (`None`) the category of one record and
    /// persists it.
    ///
    /// Under [`CategorizePolicy::ClearFlag`] assigning a label also clears the
    /// flag; clearing the category never touches the flag.
    pub fn set_category(
        &mut self,
        address: &str,
        category: Option<&str>,
    ) -> StoreResult<&Application> {
        let policy = self.policy;
        let position = self.position(address)?;

        if let Some(label) = category {
            let applicant_type = self.records[position].applicant_type;
            if !self.taxonomy.contains(applicant_type, label) {
                return Err(StoreError::UnknownCategory {
                    address: address.to_string(),
                    applicant_type,
                    label: label.to_string(),
                });
            }
        }

        self.mutate(position, "set_category", |app| {
            app.pw_category = category.map(str::to_string);
            if category.is_some() && policy == CategorizePolicy::ClearFlag {
                app.clear_flag();
            }
        })
    }

    /// Flags one record with `reason`, dropping its category.
    pub fn flag(&mut self, address: &str, reason: impl Into<String>) -> StoreResult<&Application> {
        let position = self.position(address)?;
        let reason = reason.into();
        self.mutate(position, "flag", |app| app.flag(reason))
    }

    /// Removes flag and reason from one record.
    pub fn unflag(&mut self, address: &str) -> StoreResult<&Application> {
        let position = self.position(address)?;
        self.mutate(position, "unflag", Application::clear_flag)
    }

    /// Toggles PROJECT/INDIVIDUAL, clearing the category.
    pub fn switch_applicant_type(&mut self, address: &str) -> StoreResult<&Application> {
        let position = self.position(address)?;
        self.mutate(
            position,
            "switch_applicant_type",
            Application::switch_applicant_type,
        )
    }

    /// Writes the current in-memory copy of one record to storage.
    pub fn persist(&self, address: &str) -> StoreResult<()> {
        let position = self.position(address)?;
        self.repo.save(&self.records[position])?;
        Ok(())
    }

    pub fn get(&self, address: &str) -> Option<&Application> {
        self.index
            .get(address)
            .map(|position| &self.records[*position])
    }

    /// All records in load order.
    pub fn records(&self) -> &[Application] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records currently holding `label`, flagged ones included.
    pub fn in_category<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a Application> + 'a {
        self.records
            .iter()
            .filter(move |app| app.pw_category.as_deref() == Some(label))
    }

    /// Records with neither a category nor a flag.
    pub fn uncategorized(&self) -> impl Iterator<Item = &Application> + '_ {
        self.records
            .iter()
            .filter(|app| app.pw_category.is_none() && !app.is_flagged())
    }

    pub fn flagged(&self) -> impl Iterator<Item = &Application> + '_ {
        self.records.iter().filter(|app| app.is_flagged())
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    fn position(&self, address: &str) -> StoreResult<usize> {
        self.index
            .get(address)
            .copied()
            .ok_or_else(|| StoreError::NotFound(address.to_string()))
    }

    fn mutate<F>(&mut self, position: usize, action: &str, apply: F) -> StoreResult<&Application>
    where
        F: FnOnce(&mut Application),
    {
        let snapshot = self.records[position].clone();
        apply(&mut self.records[position]);

        if let Err(err) = self.repo.save(&self.records[position]) {
            self.records[position] = snapshot;
            error!(
                "event=record_mutation module=store status=error action={} address={} reverted=true error={}",
                action, self.records[position].applicant_address, err
            );
            return Err(err.into());
        }

        let app = &self.records[position];
        info!(
            "event=record_mutation module=store status=ok action={} address={} type={} category={} flagged={}",
            action,
            app.applicant_address,
            app.applicant_type,
            app.pw_category.as_deref().unwrap_or("-"),
            app.is_flagged()
        );
        Ok(app)
    }
}
