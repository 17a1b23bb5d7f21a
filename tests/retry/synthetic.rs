use std::time::Duration;

use httpmock::Method::GET;
use insider_screener::core::with_retry;
use insider_screener::{Backoff, IsError, RetryConfig, scrape};

use crate::common;

#[tokio::test]
async fn scrape_retries_on_persistent_5xx() {
    let server = common::setup_server();
    let fail_mock = server.mock(|when, then| {
        when.method(GET).path("/en/company/acme");
        then.status(503).body("Service Unavailable");
    });

    let max_attempts = 3;
    let mut retry = RetryConfig::default();
    retry.backoff = Backoff::Fixed(Duration::from_millis(1));
    retry.max_attempts = max_attempts;

    let client = common::client_for(&server, retry);
    let url = client.company_url("acme").unwrap();
    let result = with_retry(client.retry_config(), "acme", || {
        scrape::fetch_snapshot(&client, "acme", &url)
    })
    .await;

    fail_mock.assert_hits(max_attempts as usize);
    match result {
        Err(IsError::Status { status, .. }) => assert_eq!(status, 503),
        other => panic!("expected a Status error after all attempts failed, got {other:?}"),
    }
}

#[tokio::test]
async fn scrape_does_not_retry_client_errors() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/en/company/acme");
        then.status(404);
    });

    let mut retry = RetryConfig::default();
    retry.backoff = Backoff::Fixed(Duration::from_millis(1));
    let client = common::client_for(&server, retry);
    let url = client.company_url("acme").unwrap();
    let _ = with_retry(client.retry_config(), "acme", || {
        scrape::fetch_snapshot(&client, "acme", &url)
    })
    .await;

    mock.assert_hits(1);
}
