use insider_screener::{Company, CompanyOutcome, RetryConfig, RunSummary, TrackerConfig};

use crate::common;
use crate::recorder;

fn outcome(slug: &str, success: bool, new: usize) -> CompanyOutcome {
    CompanyOutcome {
        slug: slug.into(),
        name: slug.to_uppercase(),
        source_url: format!("https://example.test/en/company/{slug}"),
        success,
        has_changes: new > 0,
        new_transactions: new,
        removed_transactions: 0,
        metrics_changed: false,
        current_path: None,
        error: (!success).then(|| "boom".to_string()),
    }
}

#[test]
fn counts_and_filters() {
    let summary = RunSummary::new(vec![
        outcome("acme", true, 3),
        outcome("broken", false, 0),
        outcome("globex", true, 0),
        outcome("initech", true, 2),
    ]);

    assert_eq!(summary.tracked(), 4);
    assert_eq!(summary.successful(), 3);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.with_changes().count(), 2);
    assert_eq!(summary.total_new_transactions(), 5);
    let listed: Vec<&str> = summary
        .companies_with_new_transactions()
        .map(|o| o.slug.as_str())
        .collect();
    assert_eq!(listed, ["acme", "initech"]);
    assert_eq!(summary.failures().next().unwrap().slug, "broken");
    summary.log_summary();
}

#[tokio::test]
async fn summary_notification_only_when_enabled() {
    let server = common::setup_server();
    let _page = common::mock_company_page(
        &server,
        "acme",
        common::page_html("Acme AB", "12", &common::abc()),
    );
    let companies = [Company::new("acme", "Acme AB")];

    let off = tempfile::tempdir().unwrap();
    let (tracker, notes) = recorder::tracker(
        common::client_for(&server, RetryConfig::disabled()),
        off.path(),
        TrackerConfig::default(),
    );
    tracker.run(&companies).await;
    assert!(notes.summaries.lock().unwrap().is_empty());

    let on = tempfile::tempdir().unwrap();
    let (tracker, notes) = recorder::tracker(
        common::client_for(&server, RetryConfig::disabled()),
        on.path(),
        TrackerConfig {
            max_concurrent: 1,
            send_summary: true,
        },
    );
    tracker.run(&companies).await;
    assert_eq!(*notes.summaries.lock().unwrap(), vec![3]);
}
