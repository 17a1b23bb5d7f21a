use insider_screener::transaction_hash;

use crate::common;

#[test]
fn same_identity_fields_give_same_hash() {
    let a = common::txn("Anna Andersson", "1,000", "SEK 100,000");
    let mut b = a.clone();
    b.transaction_type = "Sale".into();
    b.insider_position = "CFO".into();
    b.insider_role = "Board".into();
    b.price = "SEK 99.00".into();
    b.price_calculated = "100.00".into();
    b.additional_info = Some("Closely associated".into());

    assert_eq!(transaction_hash(&a), transaction_hash(&b));
}

#[test]
fn each_identity_field_changes_the_hash() {
    let base = common::txn("Anna Andersson", "1,000", "SEK 100,000");
    let h = transaction_hash(&base);

    let mut t = base.clone();
    t.notification_date = "2025-10-02".into();
    assert_ne!(h, transaction_hash(&t), "notification_date");

    let mut t = base.clone();
    t.transaction_date = "2025-09-29".into();
    assert_ne!(h, transaction_hash(&t), "transaction_date");

    let mut t = base.clone();
    t.insider_name = "Anna Berg".into();
    assert_ne!(h, transaction_hash(&t), "insider_name");

    let mut t = base.clone();
    t.number_of_shares = "1,001".into();
    assert_ne!(h, transaction_hash(&t), "number_of_shares");

    let mut t = base;
    t.value = "SEK 100,001".into();
    assert_ne!(h, transaction_hash(&t), "value");
}

#[test]
fn hash_is_stable_across_calls_and_clones() {
    let a = common::txn("Bo Berg", "2,000", "SEK 200,000");
    let first = transaction_hash(&a);
    assert_eq!(first, transaction_hash(&a.clone()));
    assert_eq!(first.to_string().len(), 16);
    assert_eq!(format!("{:016x}", first.as_u64()), first.to_string());
}
