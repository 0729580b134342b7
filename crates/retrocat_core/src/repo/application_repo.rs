//! Application repository contract and file-per-record implementation.
//!
//! # Responsibility
//! - Load every record in the data directory in one pass.
//! - Write one record back as pretty-printed JSON.
//!
//! # Invariants
//! - Load is all-or-nothing: the first bad entry aborts it.
//! - Addresses are unique because each one is pinned to its entry name.
//! - Write paths call `Application::validate()` before touching storage.
//! - Entries without the record suffix are skipped, never decoded.
//! - A rewrite keeps the key order of the file it was loaded from; keys new to
//!   the record are appended in model order.

use crate::model::application::{Application, ApplicationValidationError};
use crate::storage::{StorageAdapter, StorageError};
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

/// File suffix of every record entry.
pub const RECORD_FILE_SUFFIX: &str = ".json";

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    Decode {
        entry: String,
        source: serde_json::Error,
    },
    Encode(serde_json::Error),
    Validation {
        entry: String,
        source: ApplicationValidationError,
    },
    /// Entry stem and `applicantAddress` disagree.
    IdentityMismatch {
        entry: String,
        address: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode { entry, source } => {
                write!(f, "malformed application record `{entry}`: {source}")
            }
            Self::Encode(err) => write!(f, "failed to encode application record: {err}"),
            Self::Validation { entry, source } => {
                write!(f, "invalid application record `{entry}`: {source}")
            }
            Self::IdentityMismatch { entry, address } => write!(
                f,
                "entry `{entry}` holds applicantAddress `{address}`; expected `{address}{RECORD_FILE_SUFFIX}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Validation { source, .. } => Some(source),
            Self::IdentityMismatch { .. } => None,
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Persistence contract the record store is written against.
pub trait ApplicationRepository {
    /// Reads every record, in storage listing order.
    fn load_all(&self) -> RepoResult<Vec<Application>>;
    /// Overwrites the entry keyed by `app.applicant_address`.
    fn save(&self, app: &Application) -> RepoResult<()>;
}

/// Repository storing one JSON file per record in a flat directory.
pub struct FileApplicationRepository<S: StorageAdapter> {
    storage: S,
    data_dir: PathBuf,
    /// Last known JSON of each entry, used to keep its key order on rewrite.
    layouts: RefCell<HashMap<String, Value>>,
}

impl<S: StorageAdapter> FileApplicationRepository<S> {
    pub fn new(storage: S, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            data_dir: data_dir.into(),
            layouts: RefCell::new(HashMap::new()),
        }
    }

    /// Path of the entry that holds `address`.
    pub fn entry_path(&self, address: &str) -> PathBuf {
        self.data_dir.join(format!("{address}{RECORD_FILE_SUFFIX}"))
    }

    fn load_entry(&self, entry: &str, stem: &str) -> RepoResult<(Application, Value)> {
        let bytes = self.storage.read_entry(&self.data_dir.join(entry))?;
        let decode_error = |source| RepoError::Decode {
            entry: entry.to_string(),
            source,
        };
        let raw: Value = serde_json::from_slice(&bytes).map_err(decode_error)?;
        let app = Application::deserialize(&raw).map_err(decode_error)?;
        app.validate().map_err(|source| RepoError::Validation {
            entry: entry.to_string(),
            source,
        })?;
        if app.applicant_address != stem {
            return Err(RepoError::IdentityMismatch {
                entry: entry.to_string(),
                address: app.applicant_address,
            });
        }
        Ok((app, raw))
    }
}

impl<S: StorageAdapter> ApplicationRepository for FileApplicationRepository<S> {
    fn load_all(&self) -> RepoResult<Vec<Application>> {
        let started_at = Instant::now();
        let entries = self.storage.list_entries(&self.data_dir)?;
        let mut apps = Vec::with_capacity(entries.len());
        let mut layouts = HashMap::with_capacity(entries.len());

        for entry in &entries {
            let Some(stem) = entry.strip_suffix(RECORD_FILE_SUFFIX) else {
                warn!(
                    "event=repo_load module=repo status=skip reason=not_record entry={}",
                    entry
                );
                continue;
            };
            let (app, raw) = self.load_entry(entry, stem).inspect_err(|err| {
                error!(
                    "event=repo_load module=repo status=error entry={} error={}",
                    entry, err
                );
            })?;
            layouts.insert(app.applicant_address.clone(), raw);
            apps.push(app);
        }

        *self.layouts.borrow_mut() = layouts;

        info!(
            "event=repo_load module=repo status=ok records={} entries={} duration_ms={}",
            apps.len(),
            entries.len(),
            started_at.elapsed().as_millis()
        );
        Ok(apps)
    }

    fn save(&self, app: &Application) -> RepoResult<()> {
        app.validate().map_err(|source| RepoError::Validation {
            entry: app.applicant_address.clone(),
            source,
        })?;
        let value = serde_json::to_value(app).map_err(RepoError::Encode)?;
        let value = match self.layouts.borrow().get(&app.applicant_address) {
            Some(layout) => apply_layout(value, layout),
            None => value,
        };
        let bytes = serde_json::to_vec_pretty(&value).map_err(RepoError::Encode)?;
        let path = self.entry_path(&app.applicant_address);
        self.storage.write_entry(&path, &bytes)?;
        self.layouts
            .borrow_mut()
            .insert(app.applicant_address.clone(), value);
        debug!(
            "event=record_persist module=repo status=ok address={} bytes={}",
            app.applicant_address,
            bytes.len()
        );
        Ok(())
    }
}

/// Encodes a record in model key order as two-space indented JSON.
pub fn encode_application(app: &Application) -> RepoResult<Vec<u8>> {
    serde_json::to_vec_pretty(app).map_err(RepoError::Encode)
}

/// Reorders object keys of `value` to follow `layout`, recursively.
///
/// Keys missing from `value` are dropped; keys missing from `layout` keep
/// their relative order after the known ones.
fn apply_layout(value: Value, layout: &Value) -> Value {
    match (value, layout) {
        (Value::Object(fields), Value::Object(template)) => {
            let mut ordered = Map::with_capacity(fields.len());
            for (key, template_child) in template {
                if let Some(child) = fields.get(key) {
                    ordered.insert(key.clone(), apply_layout(child.clone(), template_child));
                }
            }
            for (key, child) in fields {
                if !ordered.contains_key(&key) {
                    ordered.insert(key, child);
                }
            }
            Value::Object(ordered)
        }
        (Value::Array(items), Value::Array(template)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(position, item)| match template.get(position) {
                    Some(template_item) => apply_layout(item, template_item),
                    None => item,
                })
                .collect(),
        ),
        (value, _) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::apply_layout;
    use serde_json::json;

    #[test]
    fn layout_orders_nested_keys_and_appends_new_ones() {
        let layout = json!({"b": 1, "a": [{"y": 1, "x": 2}], "gone": true});
        let value = json!({"a": [{"x": 3, "y": 4}, {"x": 5}], "b": 2, "new": "n"});

        let ordered = apply_layout(value, &layout);
        let text = serde_json::to_string(&ordered).unwrap();
        assert_eq!(
            text,
            r#"{"b":2,"a":[{"y":4,"x":3},{"x":5}],"new":"n"}"#
        );
    }
}
