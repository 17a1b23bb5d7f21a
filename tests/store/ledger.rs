use insider_screener::store::ChangeLedgerStore;
use insider_screener::{ChangeLedgerEntry, detect};

use crate::common;

fn entry(i: usize) -> ChangeLedgerEntry {
    let r = detect(None, &common::snapshot(common::abc()));
    ChangeLedgerEntry::from_change(format!("entry-{i:03}"), common::ts(i as i64).to_rfc3339(), &r)
}

#[test]
fn missing_ledger_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(ChangeLedgerStore::new(dir.path(), 100).read("acme").unwrap().is_none());
}

#[test]
fn keeps_the_last_max_entries_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let store = ChangeLedgerStore::new(dir.path(), 100);
    for i in 0..105 {
        store.append("acme", entry(i)).unwrap();
    }

    let ledger = store.read("acme").unwrap().unwrap();
    assert_eq!(ledger.company, "acme");
    assert_eq!(ledger.changes.len(), 100);
    assert_eq!(ledger.changes.first().unwrap().timestamp, "entry-005");
    assert_eq!(ledger.changes.last().unwrap().timestamp, "entry-104");
    assert!(
        ledger
            .changes
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp)
    );
}

#[test]
fn file_layout_matches_company_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = ChangeLedgerStore::new(dir.path(), 3);
    let path = store.append("acme", entry(0)).unwrap();

    assert_eq!(path, dir.path().join("acme_changes.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["company"], "acme");
    assert_eq!(json["changes"][0]["new_transactions"], 3);
    assert_eq!(json["changes"][0]["details"]["type"], "initial_load");
}
