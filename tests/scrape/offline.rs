use insider_screener::IsError;
use insider_screener::scrape::{calculated_price, parse_page};

use crate::common;

const URL: &str = "https://www.insiderscreener.com/en/company/acme";

#[test]
fn parses_company_metrics() {
    let html = common::page_html("Acme AB", "12", &common::abc());
    let snap = parse_page(&html, URL, common::ts(0)).unwrap();

    let info = &snap.company_info;
    assert_eq!(info.company_name, "Acme AB");
    assert_eq!(info.value_bought.as_deref(), Some("SEK 600,000"));
    assert_eq!(info.value_sold.as_deref(), Some("SEK 0"));
    assert_eq!(info.net_insiders_buying.as_deref(), Some("SEK 600,000"));
    assert_eq!(info.trades_count.as_deref(), Some("12"));
    assert_eq!(info.insider_activity.as_deref(), Some("High"));
    assert_eq!(snap.url, URL);
    assert_eq!(snap.scraped_at, common::ts(0));
}

#[test]
fn parses_transaction_rows() {
    let mut txns = common::abc();
    txns[1].transaction_type = "Sale".into();
    txns[1].additional_info = Some("Closely associated person".into());
    let html = common::page_html("Acme AB", "12", &txns);

    let snap = parse_page(&html, URL, common::ts(0)).unwrap();
    assert_eq!(snap.total_transactions, 3);
    assert_eq!(snap.transactions.len(), 3);

    let a = &snap.transactions[0];
    assert_eq!(a.notification_date, "2025-10-01");
    assert_eq!(a.transaction_date, "2025-09-30");
    assert_eq!(a.transaction_type, "Purchase");
    assert_eq!(a.insider_name, "Anna Andersson");
    assert_eq!(a.insider_position, "CEO");
    assert_eq!(a.insider_role, "Executive");
    assert_eq!(a.additional_info, None);
    assert_eq!(a.number_of_shares, "1,000");
    assert_eq!(a.price, "SEK 100.00");
    assert_eq!(a.value, "SEK 100,000");
    assert_eq!(a.price_calculated, "100.00");

    let b = &snap.transactions[1];
    assert_eq!(b.transaction_type, "Sale");
    assert_eq!(b.additional_info.as_deref(), Some("Closely associated person"));
    snap.validate("acme").unwrap();
}

#[test]
fn missing_metric_is_none() {
    let html = common::page_html("Acme AB", "12", &common::abc())
        .replace("<h6 class=\"text-muted\">Insider activity</h6><h5>High</h5>", "");
    let snap = parse_page(&html, URL, common::ts(0)).unwrap();
    assert_eq!(snap.company_info.insider_activity, None);
}

#[test]
fn empty_table_yields_no_transactions() {
    let html = common::page_html("Acme AB", "0", &[]);
    let snap = parse_page(&html, URL, common::ts(0)).unwrap();
    assert_eq!(snap.total_transactions, 0);
}

#[test]
fn short_rows_are_skipped() {
    let html = common::page_html("Acme AB", "12", &common::abc()).replace(
        "<tbody>\n",
        "<tbody>\n<tr><td colspan=\"8\">Show more</td></tr>\n",
    );
    let snap = parse_page(&html, URL, common::ts(0)).unwrap();
    assert_eq!(snap.total_transactions, 3);
}

#[test]
fn page_without_table_is_a_data_error() {
    let html = "<html><body><h1>Acme AB</h1><p>Loading…</p></body></html>";
    match parse_page(html, URL, common::ts(0)) {
        Err(IsError::Data(msg)) => assert!(msg.contains("table")),
        other => panic!("expected Data error, got {other:?}"),
    }
}

#[test]
fn entities_and_whitespace_are_normalised() {
    let mut txns = vec![common::txn("Åsa &amp; Co", "1,000", "SEK&nbsp;100,000")];
    txns[0].insider_position = "Board   member".into();
    let html = common::page_html("Acme &amp; Sons AB", "1", &txns);

    let snap = parse_page(&html, URL, common::ts(0)).unwrap();
    assert_eq!(snap.company_info.company_name, "Acme & Sons AB");
    let t = &snap.transactions[0];
    assert_eq!(t.insider_name, "Åsa & Co");
    assert_eq!(t.insider_position, "Board member");
    assert_eq!(t.value, "SEK 100,000");
    assert_eq!(t.price_calculated, "100.00");
}

#[test]
fn calculated_price_needs_two_positive_numbers() {
    assert_eq!(calculated_price("2,500", "SEK 50,000").as_deref(), Some("20.00"));
    assert_eq!(calculated_price("3", "USD 10").as_deref(), Some("3.33"));
    assert_eq!(calculated_price("1 000", "EUR 1 500").as_deref(), Some("1.50"));
    assert_eq!(calculated_price("0", "SEK 100"), None);
    assert_eq!(calculated_price("-", "SEK 100"), None);
    assert_eq!(calculated_price("100", ""), None);
}
