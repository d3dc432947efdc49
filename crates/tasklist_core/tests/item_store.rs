use chrono::{NaiveDate, NaiveDateTime};
use tasklist_core::{
    FixedClock, ItemStatus, ItemStore, ItemValidationError, Listing, SearchOutcome, StoreError,
};

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .unwrap()
}

fn store_with(titles: &[&str]) -> ItemStore<FixedClock> {
    let mut store = ItemStore::new(FixedClock::new(start()));
    for title in titles {
        store.add(title).unwrap();
    }
    store
}

fn titles(store: &ItemStore<FixedClock>) -> Vec<&str> {
    store.items().iter().map(|item| item.title()).collect()
}

#[test]
fn add_appends_pending_item_with_trimmed_title() {
    let mut store = store_with(&[]);
    for (count, raw) in ["Buy milk", "  spaced out  ", "\tWrite   report\n", "ü"]
        .iter()
        .enumerate()
    {
        store.add(raw).unwrap();
        assert_eq!(store.len(), count + 1);
        let added = store.get(store.len()).unwrap();
        assert_eq!(added.title(), raw.trim());
        assert_eq!(added.status(), ItemStatus::Pending);
        assert_eq!(added.created_at(), start());
    }
}

#[test]
fn add_rejects_blank_titles_without_mutation() {
    let mut store = store_with(&["keep"]);
    for raw in ["", "   ", "\t\n"] {
        let err = store.add(raw).unwrap_err();
        assert_eq!(err, StoreError::InvalidInput(ItemValidationError::EmptyTitle));
        assert_eq!(err.to_string(), "Task title cannot be empty.");
    }
    assert_eq!(titles(&store), vec!["keep"]);
}

#[test]
fn list_numbers_items_in_insertion_order() {
    let store = store_with(&["Buy milk", "Write report"]);
    let Listing::Items(rows) = store.list() else {
        panic!("expected items");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].position, rows[0].title), (1, "Buy milk"));
    assert_eq!((rows[1].position, rows[1].title), (2, "Write report"));
    assert!(rows.iter().all(|row| row.status == ItemStatus::Pending));
}

#[test]
fn list_on_empty_store_signals_no_items() {
    let store = store_with(&[]);
    assert_eq!(store.list(), Listing::NoItems);
}

#[test]
fn out_of_range_positions_leave_store_unchanged() {
    let mut store = store_with(&["a", "b"]);
    store.set_done(2, true).unwrap();

    for position in [0, 3, 100, usize::MAX] {
        assert_eq!(
            store.set_done(position, true).unwrap_err(),
            StoreError::OutOfRange { position, len: 2 }
        );
        assert_eq!(
            store.remove(position).unwrap_err(),
            StoreError::OutOfRange { position, len: 2 }
        );
    }

    assert_eq!(titles(&store), vec!["a", "b"]);
    assert!(!store.get(1).unwrap().is_done());
    assert!(store.get(2).unwrap().is_done());
}

#[test]
fn set_done_round_trip_restores_pending() {
    let mut store = store_with(&["a", "b"]);
    store.set_done(1, true).unwrap();
    store.set_done(1, true).unwrap();
    assert_eq!(store.get(1).unwrap().status(), ItemStatus::Done);
    assert_eq!(store.get(2).unwrap().status(), ItemStatus::Pending);

    store.set_done(1, false).unwrap();
    assert_eq!(store.get(1).unwrap().status(), ItemStatus::Pending);
}

#[test]
fn remove_shifts_later_positions_down() {
    let mut store = store_with(&["a", "b", "c", "d"]);
    let removed = store.remove(2).unwrap();
    assert_eq!(removed.title(), "b");
    assert_eq!(titles(&store), vec!["a", "c", "d"]);
    assert_eq!(store.get(2).unwrap().title(), "c");
}

#[test]
fn clear_done_removes_exactly_done_items_in_order() {
    let mut store = store_with(&["a", "b", "c", "d", "e"]);
    store.set_done(2, true).unwrap();
    store.set_done(4, true).unwrap();
    store.set_done(5, true).unwrap();

    assert_eq!(store.clear_done(), 3);
    assert_eq!(titles(&store), vec!["a", "c"]);
    assert_eq!(store.clear_done(), 0);
}

#[test]
fn clear_done_scenario_leaves_write_report_first() {
    let mut store = store_with(&["Buy milk", "Write report"]);
    store.set_done(1, true).unwrap();
    assert_eq!(store.clear_done(), 1);

    let Listing::Items(rows) = store.list() else {
        panic!("expected items");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!((rows[0].position, rows[0].title), (1, "Write report"));
}

#[test]
fn search_is_case_insensitive_with_match_local_positions() {
    let store = store_with(&["Buy milk", "Write report", "Call Bob", "bobsled"]);
    let SearchOutcome::Matches(rows) = store.search("  BOB ").unwrap() else {
        panic!("expected matches");
    };
    let found: Vec<(usize, &str)> = rows.iter().map(|row| (row.position, row.title)).collect();
    assert_eq!(found, vec![(1, "Call Bob"), (2, "bobsled")]);
}

#[test]
fn search_single_match_is_position_one() {
    let store = store_with(&["Call Bob"]);
    let SearchOutcome::Matches(rows) = store.search("bob").unwrap() else {
        panic!("expected matches");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].position, 1);
}

#[test]
fn search_reports_no_matches_and_empty_keyword() {
    let store = store_with(&["Buy milk"]);
    assert_eq!(store.search("tea").unwrap(), SearchOutcome::NoMatches);

    for keyword in ["", "   "] {
        let err = store.search(keyword).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidInput(ItemValidationError::EmptyKeyword)
        );
        assert_eq!(err.to_string(), "Search keyword cannot be empty.");
    }
}
