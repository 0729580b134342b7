//! Category label sets per applicant type.
//!
//! # Responsibility
//! - Hold the ordered PROJECT and INDIVIDUAL label sets.
//! - Load label sets from external JSON so any taxonomy revision can be used.
//!
//! # Invariants
//! - Both sets are non-empty, labels are non-blank and unique within a set.
//! - The set for a record is chosen by its applicant type only; the same
//!   label text may appear in both sets.

use crate::model::application::ApplicantType;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const BUILTIN_PROJECT_LABELS: &[&str] = &[
    "AI, Artificial Intelligence & Security",
    "Asset Management & Portfolio Tools",
    "Data Analytics & Insights",
    "Blockchain News & Media",
    "Cross-Chain Interoperability",
    "DAO Tooling",
    "Governance Tools",
    "DeFi, Decentralized Finance",
    "ReFi, Regenerative Finance",
    "Exchanges, DEX, Trading & Liquidity",
    "Developer Education & Mentoring",
    "Developer Tools - Nodes",
    "Developer Tools - Wallets",
    "Developer Tools - Smart Contracts",
    "Developer Tools - Other",
    "Gaming & Entertainment",
    "NFTs, POAPs & Collectibles",
    "Wallet & Key Management",
    "Fundraising & Capital",
    "Music & Creative NFTs",
    "Web3 Education & Adoption",
    "Reputations & Rewards",
    "Local Blockchain Communities",
    "Grants & Retroactive Funding",
    "Identity & Privacy",
    "Community Building",
    "Donations & Public Goods",
    "Bridges & Swaps",
    "Oracles",
    "Decentralized Storage",
    "Ethereum Infrastructure",
    "Messaging & Social Networks",
    "Smart Contract Auditing & Security",
    "DAOs",
    "Marketplaces & Auctions",
    "Banking & Payments",
];

const BUILTIN_INDIVIDUAL_LABELS: &[&str] = &[
    "Development & Infrastructure",
    "Blockchain Development",
    "Layer 2 & Cross-Chain Solutions",
    "Finance & DeFi",
    "Fundraising & Capital Allocation",
    "Governance & Tokenomics",
    "Security & Auditing",
    "Community Building",
    "User Experience & Adoption",
    "Content Creation & Media",
    "News & Marketing",
    "Blockchain Education",
    "Mentorship & Resources",
    "Creative NFTs & Art",
    "Music & Audio NFTs",
    "Identity & Privacy Management",
    "User Testing & Quality Assurance",
    "International & Multilingual Support",
    "Legal & Regulatory Compliance",
    "Partnerships & Collaborations",
    "Specialized & Niche Contributions",
];

/// Declaration-level problems in a label set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyValidationError {
    EmptySet(ApplicantType),
    BlankLabel(ApplicantType),
    DuplicateLabel {
        applicant_type: ApplicantType,
        label: String,
    },
}

impl Display for TaxonomyValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySet(kind) => write!(f, "{kind} label set is empty"),
            Self::BlankLabel(kind) => write!(f, "{kind} label set contains a blank label"),
            Self::DuplicateLabel {
                applicant_type,
                label,
            } => write!(f, "{applicant_type} label set repeats `{label}`"),
        }
    }
}

impl Error for TaxonomyValidationError {}

#[derive(Debug)]
pub enum TaxonomyError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode(serde_json::Error),
    Validation(TaxonomyValidationError),
}

impl Display for TaxonomyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read taxonomy `{}`: {source}", path.display())
            }
            Self::Decode(err) => write!(f, "malformed taxonomy: {err}"),
            Self::Validation(err) => write!(f, "invalid taxonomy: {err}"),
        }
    }
}

impl Error for TaxonomyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<TaxonomyValidationError> for TaxonomyError {
    fn from(value: TaxonomyValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Ordered category labels for both applicant types.
///
/// Wire form: `{"project": [...], "individual": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    project: Vec<String>,
    individual: Vec<String>,
}

impl Taxonomy {
    /// Builds and validates a taxonomy from explicit label lists.
    pub fn new(
        project: Vec<String>,
        individual: Vec<String>,
    ) -> Result<Self, TaxonomyValidationError> {
        let taxonomy = Self {
            project,
            individual,
        };
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Label sets used by the RetroPGF 3 review round.
    pub fn builtin() -> Self {
        Self {
            project: BUILTIN_PROJECT_LABELS.iter().map(|label| label.to_string()).collect(),
            individual: BUILTIN_INDIVIDUAL_LABELS
                .iter()
                .map(|label| label.to_string())
                .collect(),
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, TaxonomyError> {
        let taxonomy: Self = serde_json::from_str(source).map_err(TaxonomyError::Decode)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Reads a taxonomy file.
    ///
    /// # Side effects
    /// - Emits a `taxonomy_load` logging event.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let path = path.as_ref();
        let result = std::fs::read_to_string(path)
            .map_err(|source| TaxonomyError::Io {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|text| Self::from_json_str(&text));

        match &result {
            Ok(taxonomy) => info!(
                "event=taxonomy_load module=taxonomy status=ok path={} project_labels={} individual_labels={}",
                path.display(),
                taxonomy.project.len(),
                taxonomy.individual.len()
            ),
            Err(err) => error!(
                "event=taxonomy_load module=taxonomy status=error path={} error={}",
                path.display(),
                err
            ),
        }
        result
    }

    /// Returns the ordered labels valid for `applicant_type`.
    pub fn labels_for(&self, applicant_type: ApplicantType) -> &[String] {
        match applicant_type {
            ApplicantType::Project => &self.project,
            ApplicantType::Individual => &self.individual,
        }
    }

    pub fn contains(&self, applicant_type: ApplicantType, label: &str) -> bool {
        self.labels_for(applicant_type)
            .iter()
            .any(|candidate| candidate == label)
    }

    pub fn validate(&self) -> Result<(), TaxonomyValidationError> {
        for applicant_type in [ApplicantType::Project, ApplicantType::Individual] {
            let labels = self.labels_for(applicant_type);
            if labels.is_empty() {
                return Err(TaxonomyValidationError::EmptySet(applicant_type));
            }
            let mut dedup = BTreeSet::new();
            for label in labels {
                if label.trim().is_empty() {
                    return Err(TaxonomyValidationError::BlankLabel(applicant_type));
                }
                if !dedup.insert(label.as_str()) {
                    return Err(TaxonomyValidationError::DuplicateLabel {
                        applicant_type,
                        label: label.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}
