//! Application record model.
//!
//! # Responsibility
//! - Define the canonical record persisted one-file-per-record.
//! - Provide review-state helpers used by the record store.
//!
//! # Invariants
//! - `applicant_address` is non-empty and usable as a file stem.
//! - Fields absent on read stay absent on write; unknown fields, top-level or
//!   inside payload items, are kept verbatim in `extra`.
//! - A record whose `pw_is_flagged == Some(true)` is in flagged state
//!   regardless of `pw_category`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").expect("valid address regex"));

/// Stable record key, serialized as `applicantAddress`.
pub type ApplicantAddress = String;

/// Applicant kind. Selects which category label set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicantType {
    Project,
    Individual,
}

impl ApplicantType {
    /// Returns the other applicant type.
    pub fn toggled(self) -> Self {
        match self {
            Self::Project => Self::Individual,
            Self::Individual => Self::Project,
        }
    }

    /// Wire/display form (`PROJECT` | `INDIVIDUAL`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::Individual => "INDIVIDUAL",
        }
    }
}

impl Display for ApplicantType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Link backing a contribution claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionLink {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Self-reported impact metric.
///
/// `number` keeps the JSON representation it was read with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactMetric {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Funding amount as submitted: either a bucket label (`"under-250k"`) or a
/// plain number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FundingAmount {
    Number(Number),
    Text(String),
}

/// Prior funding source declared by the applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSource {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<FundingAmount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Review state derived from the `pw*` fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryState {
    Uncategorized,
    Categorized(String),
    /// Reason is empty when the record is flagged without one.
    Flagged(String),
}

/// Application submission with reviewer-assigned metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub applicant_address: ApplicantAddress,
    pub applicant_type: ApplicantType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution_links: Option<Vec<ContributionLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_metrics: Option<Vec<ImpactMetric>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_sources: Option<Vec<FundingSource>>,
    /// Reviewer category label; absent means uncategorized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pw_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pw_is_flagged: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pw_flagged_reason: Option<String>,
    /// Fields this model does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field presence errors for application records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationValidationError {
    EmptyAddress,
    InvalidAddress(String),
}

impl Display for ApplicationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAddress => write!(f, "applicantAddress cannot be empty"),
            Self::InvalidAddress(value) => write!(
                f,
                "applicantAddress `{value}` cannot be used as a record file name"
            ),
        }
    }
}

impl Error for ApplicationValidationError {}

impl Application {
    /// Creates a bare record with no payload and no review metadata.
    pub fn new(address: impl Into<String>, applicant_type: ApplicantType) -> Self {
        Self {
            applicant_address: address.into(),
            applicant_type,
            display_name: None,
            bio: None,
            profile_image_url: None,
            contribution_description: None,
            impact_description: None,
            website_url: None,
            contribution_links: None,
            impact_metrics: None,
            funding_sources: None,
            pw_category: None,
            pw_is_flagged: None,
            pw_flagged_reason: None,
            extra: Map::new(),
        }
    }

    /// Checks that the address can key a record file.
    pub fn validate(&self) -> Result<(), ApplicationValidationError> {
        validate_address(&self.applicant_address)
    }

    pub fn is_flagged(&self) -> bool {
        self.pw_is_flagged == Some(true)
    }

    /// Returns the derived review state.
    pub fn state(&self) -> CategoryState {
        if self.is_flagged() {
            return CategoryState::Flagged(self.pw_flagged_reason.clone().unwrap_or_default());
        }
        match &self.pw_category {
            Some(label) => CategoryState::Categorized(label.clone()),
            None => CategoryState::Uncategorized,
        }
    }

    /// Label shown on board cards; falls back to the address.
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(self.applicant_address.as_str())
    }

    /// Marks the record flagged and drops its category.
    pub fn flag(&mut self, reason: impl Into<String>) {
        self.pw_category = None;
        self.pw_is_flagged = Some(true);
        self.pw_flagged_reason = Some(reason.into());
    }

    /// Drops flag and reason. Category is left as is.
    pub fn clear_flag(&mut self) {
        self.pw_is_flagged = None;
        self.pw_flagged_reason = None;
    }

    /// Toggles the applicant type and drops the now-invalid category.
    pub fn switch_applicant_type(&mut self) {
        self.applicant_type = self.applicant_type.toggled();
        self.pw_category = None;
    }
}

/// Validates a raw address as a record key.
pub fn validate_address(address: &str) -> Result<(), ApplicationValidationError> {
    if address.trim().is_empty() {
        return Err(ApplicationValidationError::EmptyAddress);
    }
    if !ADDRESS_RE.is_match(address) {
        return Err(ApplicationValidationError::InvalidAddress(
            address.to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_address, Application, ApplicantType, ApplicationValidationError};

    #[test]
    fn applicant_type_toggles() {
        assert_eq!(ApplicantType::Project.toggled(), ApplicantType::Individual);
        assert_eq!(ApplicantType::Individual.toggled(), ApplicantType::Project);
        assert_eq!(ApplicantType::Individual.as_str(), "INDIVIDUAL");
    }

    #[test]
    fn address_rejects_path_components() {
        assert!(validate_address("0xAbC123").is_ok());
        assert_eq!(
            validate_address("../etc"),
            Err(ApplicationValidationError::InvalidAddress("../etc".to_string()))
        );
        assert_eq!(validate_address("  "), Err(ApplicationValidationError::EmptyAddress));
        assert!(validate_address("a/b").is_err());
    }

    #[test]
    fn title_falls_back_to_address() {
        let mut app = Application::new("0x01", ApplicantType::Project);
        assert_eq!(app.title(), "0x01");
        app.display_name = Some("Foo".to_string());
        assert_eq!(app.title(), "Foo");
    }
}
