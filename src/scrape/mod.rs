//! Fetch a company page and turn it into a [`Snapshot`].
//!
//! This is an adapter over markup the crate does not control; everything it
//! produces is plain display text. No retry happens here, the tracker wraps
//! [`fetch_snapshot`] in the client's retry policy.

mod extract;
pub(crate) mod html;

pub use extract::calculated_price;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use url::Url;

use crate::core::{IsClient, IsError, Snapshot};

/// Download and parse the page of one company.
///
/// # Errors
///
/// Returns an error if the request fails, the status is not successful, or the
/// page has no transaction table.
pub async fn fetch_snapshot(client: &IsClient, slug: &str, url: &Url) -> Result<Snapshot, IsError> {
    info!("Starting scrape for {url}");
    let body = client.get_page(url, slug).await?;
    let snapshot = parse_page(&body, url.as_str(), Utc::now())?;
    info!(
        "Successfully scraped {}: {} transactions",
        snapshot.company_info.company_name, snapshot.total_transactions
    );
    Ok(snapshot)
}

/// Parse an already downloaded company page.
pub fn parse_page(page: &str, url: &str, scraped_at: DateTime<Utc>) -> Result<Snapshot, IsError> {
    let transactions = extract::transactions(page)?;
    debug!("Extracted {} transactions", transactions.len());
    let company_info = extract::company_info(page);
    Ok(Snapshot::at(scraped_at, url, company_info, transactions))
}
