use chrono::{TimeZone, Utc};
use insider_screener::detect;

use crate::common;

#[test]
fn open_creates_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::open_store(dir.path(), 100);
    for sub in ["current", "history", "changes"] {
        assert!(store.base_dir().join(sub).is_dir(), "{sub} missing");
    }
}

#[test]
fn change_writes_current_history_and_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::open_store(dir.path(), 100);
    let snap = common::snapshot(common::abc());
    let changes = detect(None, &snap);
    let at = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();

    let current = store.save_data_at("acme", &snap, &changes, &at).unwrap();

    assert_eq!(current, store.base_dir().join("current").join("acme.json"));
    assert_eq!(store.load_current("acme").unwrap(), Some(snap.clone()));
    assert_eq!(store.history().list("acme").unwrap().len(), 1);

    let ledger = store.change_history("acme").unwrap().unwrap();
    assert_eq!(ledger.changes.len(), 1);
    let e = &ledger.changes[0];
    assert_eq!(e.timestamp, "2025-10-01_12-00-00");
    assert_eq!(e.scraped_at, snap.scraped_at.to_rfc3339());
    assert_eq!((e.new_transactions, e.removed_transactions), (3, 0));
}

#[test]
fn no_change_only_refreshes_current() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::open_store(dir.path(), 100);
    let first = common::snapshot(common::abc());
    let t1 = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
    store
        .save_data_at("acme", &first, &detect(None, &first), &t1)
        .unwrap();

    let mut again = first.clone();
    again.scraped_at = common::ts(3600);
    let changes = detect(Some(&first), &again);
    assert!(!changes.has_changes);
    let t2 = Utc.with_ymd_and_hms(2025, 10, 1, 13, 0, 0).unwrap();
    store.save_data_at("acme", &again, &changes, &t2).unwrap();

    assert_eq!(
        store.load_current("acme").unwrap().unwrap().scraped_at,
        common::ts(3600)
    );
    assert_eq!(store.history().list("acme").unwrap().len(), 1);
    assert_eq!(store.change_history("acme").unwrap().unwrap().changes.len(), 1);
}

#[test]
fn ledger_bound_comes_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let store = common::open_store(dir.path(), 2);
    assert_eq!(store.ledger().max_entries(), 2);

    let snap = common::snapshot(common::abc());
    let changes = detect(None, &snap);
    for hour in 0..4 {
        let at = Utc.with_ymd_and_hms(2025, 10, 1, hour, 0, 0).unwrap();
        store.save_data_at("acme", &snap, &changes, &at).unwrap();
    }

    let ledger = store.change_history("acme").unwrap().unwrap();
    let stamps: Vec<&str> = ledger.changes.iter().map(|e| e.timestamp.as_str()).collect();
    assert_eq!(stamps, ["2025-10-01_02-00-00", "2025-10-01_03-00-00"]);
    assert_eq!(store.history().list("acme").unwrap().len(), 4);
}
