use retrocat_core::{
    ApplicantType, Board, CategorizePolicy, FileApplicationRepository, MemoryStorage, RecordStore,
    Taxonomy,
};
use serde_json::json;

fn seed(storage: &MemoryStorage, record: serde_json::Value) {
    let address = record["applicantAddress"].as_str().unwrap().to_string();
    storage.insert(
        format!("data/{address}.json"),
        serde_json::to_vec(&record).unwrap(),
    );
}

fn small_taxonomy() -> Taxonomy {
    Taxonomy::new(
        vec!["Oracles".to_string(), "DAOs".to_string()],
        vec!["Blockchain Education".to_string()],
    )
    .unwrap()
}

#[test]
fn empty_store_shows_zero_cards_in_every_column() {
    let storage = MemoryStorage::new();
    let mut store = RecordStore::new(
        FileApplicationRepository::new(&storage, "data"),
        Taxonomy::builtin(),
        CategorizePolicy::ClearFlag,
    );
    store.load().unwrap();

    for view in [ApplicantType::Project, ApplicantType::Individual] {
        let board = Board::build(&store, view);
        assert_eq!(board.columns.len(), store.taxonomy().labels_for(view).len());
        assert!(board.columns.iter().all(|column| column.cards.is_empty()));
        assert_eq!(board.card_count(), 0);
    }
}

#[test]
fn records_land_in_exactly_one_lane_of_their_view() {
    let storage = MemoryStorage::new();
    seed(&storage, json!({"applicantAddress": "0x01", "applicantType": "PROJECT", "displayName": "Oracle Co", "pwCategory": "Oracles"}));
    seed(&storage, json!({"applicantAddress": "0x02", "applicantType": "PROJECT", "pwCategory": "Retired Label"}));
    seed(&storage, json!({"applicantAddress": "0x03", "applicantType": "PROJECT", "pwIsFlagged": true, "pwFlaggedReason": "spam", "pwCategory": "DAOs"}));
    seed(&storage, json!({"applicantAddress": "0x04", "applicantType": "PROJECT"}));
    seed(&storage, json!({"applicantAddress": "0x05", "applicantType": "INDIVIDUAL", "pwCategory": "Blockchain Education"}));

    let mut store = RecordStore::new(
        FileApplicationRepository::new(&storage, "data"),
        small_taxonomy(),
        CategorizePolicy::KeepFlag,
    );
    store.load().unwrap();

    let board = Board::build(&store, ApplicantType::Project);
    assert_eq!(board.card_count(), 4);
    assert_eq!(board.columns[0].label, "Oracles");
    assert_eq!(board.columns[0].cards[0].title, "Oracle Co");
    assert!(board.columns[1].cards.is_empty());
    assert_eq!(board.orphaned[0].address, "0x02");
    assert_eq!(board.flagged[0].address, "0x03");
    assert_eq!(board.uncategorized[0].title, "0x04");

    let board = Board::build(&store, ApplicantType::Individual);
    assert_eq!(board.card_count(), 1);
    assert_eq!(board.columns[0].cards[0].address, "0x05");
}
