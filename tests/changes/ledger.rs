use insider_screener::{ChangeLedger, ChangeLedgerEntry, detect};

use crate::common;

fn entry(i: usize) -> ChangeLedgerEntry {
    let r = detect(None, &common::snapshot(common::abc()));
    ChangeLedgerEntry::from_change(format!("t{i:03}"), "2025-10-01T00:00:00+00:00", &r)
}

#[test]
fn push_bounded_drops_oldest_first() {
    let mut ledger = ChangeLedger::empty("acme");
    for i in 0..7 {
        ledger.push_bounded(entry(i), 5);
    }
    let stamps: Vec<&str> = ledger.changes.iter().map(|e| e.timestamp.as_str()).collect();
    assert_eq!(stamps, ["t002", "t003", "t004", "t005", "t006"]);
}

#[test]
fn entry_copies_counts_and_details() {
    let r = detect(None, &common::snapshot(common::abc()));
    let e = ChangeLedgerEntry::from_change("2025-10-01_12-00-00", "scraped", &r);
    assert_eq!(e.new_transactions, 3);
    assert_eq!(e.removed_transactions, 0);
    assert!(!e.metrics_changed);
    assert_eq!(e.details, r.details);
}

#[test]
fn details_serialize_with_type_tag() {
    let r = detect(None, &common::snapshot(common::abc()));
    let json = serde_json::to_value(&r.details).unwrap();
    assert_eq!(json["type"], "initial_load");
    assert_eq!(json["message"], "First time scraping this company");

    let old = common::snapshot(common::abc());
    let new = common::snapshot(vec![common::d()]);
    let json = serde_json::to_value(&detect(Some(&old), &new).details).unwrap();
    assert_eq!(json["type"], "diff");
    assert_eq!(json["new_transactions_list"].as_array().unwrap().len(), 1);
    assert_eq!(json["removed_transactions_list"].as_array().unwrap().len(), 3);
}
