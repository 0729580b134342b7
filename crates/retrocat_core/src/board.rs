//! Column projection of the record store for one applicant-type view.
//!
//! # Responsibility
//! - Group records of the viewed type into one column per category label.
//! - Surface records that fit no column (uncategorized, flagged, orphaned).
//!
//! # Invariants
//! - Every record of the viewed type lands in exactly one lane.
//! - Column order follows taxonomy order.

use crate::model::application::{ApplicantType, Application, CategoryState};
use crate::repo::application_repo::ApplicationRepository;
use crate::service::record_store::RecordStore;

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub address: String,
    pub title: String,
}

impl Card {
    fn from_application(app: &Application) -> Self {
        Self {
            address: app.applicant_address.clone(),
            title: app.title().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub label: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub view: ApplicantType,
    pub columns: Vec<Column>,
    pub uncategorized: Vec<Card>,
    pub flagged: Vec<Card>,
    /// Categorized with a label the current taxonomy does not know.
    pub orphaned: Vec<Card>,
}

impl Board {
    pub fn build<R: ApplicationRepository>(store: &RecordStore<R>, view: ApplicantType) -> Self {
        let labels = store.taxonomy().labels_for(view);
        let mut columns: Vec<Column> = labels
            .iter()
            .map(|label| Column {
                label: label.clone(),
                cards: Vec::new(),
            })
            .collect();
        let mut uncategorized = Vec::new();
        let mut flagged = Vec::new();
        let mut orphaned = Vec::new();

        for app in store.records().iter().filter(|app| app.applicant_type == view) {
            let card = Card::from_application(app);
            match app.state() {
                CategoryState::Uncategorized => uncategorized.push(card),
                CategoryState::Flagged(_) => flagged.push(card),
                CategoryState::Categorized(label) => {
                    match columns.iter_mut().find(|column| column.label == label) {
                        Some(column) => column.cards.push(card),
                        None => orphaned.push(card),
                    }
                }
            }
        }

        Self {
            view,
            columns,
            uncategorized,
            flagged,
            orphaned,
        }
    }

    /// Number of cards across every lane.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|column| column.cards.len()).sum::<usize>()
            + self.uncategorized.len()
            + self.flagged.len()
            + self.orphaned.len()
    }
}
