//! The per-company pipeline and the run loop around it.
//!
//! For each company: load the previous snapshot, scrape a new one (with retry),
//! validate it, detect changes, persist, and notify. A failure is recorded in the
//! company's [`CompanyOutcome`] and the run moves on to the next company.

mod locks;
mod summary;

pub use locks::EntityLocks;
pub use summary::{CompanyOutcome, RunSummary};

use std::path::PathBuf;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{error, info, warn};
use url::Url;

use crate::changes::{ChangeResult, detect};
use crate::companies::Company;
use crate::core::{IsClient, IsError, Settings, with_retry};
use crate::notify::{EmailNotifier, LogNotifier, Notifier};
use crate::scrape;
use crate::store::DataStore;

/// How many sample transactions are logged per detected change.
const SAMPLE_TRANSACTIONS: usize = 2;

/// Run-level options for a [`Tracker`].
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Companies processed at once. `1` keeps the fixed sequential order.
    pub max_concurrent: usize,
    /// Send a summary notification after the run.
    pub send_summary: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 1,
            send_summary: false,
        }
    }
}

pub struct Tracker {
    client: IsClient,
    store: DataStore,
    notifier: Option<Arc<dyn Notifier>>,
    config: TrackerConfig,
    locks: EntityLocks,
}

impl Tracker {
    /// The scrape step is retried according to `client.retry_config()`.
    pub fn new(
        client: IsClient,
        store: DataStore,
        notifier: Option<Arc<dyn Notifier>>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            client,
            store,
            notifier,
            config,
            locks: EntityLocks::new(),
        }
    }

    /// Wire client, store and notifier from settings.
    ///
    /// Email is used when notifications are on and the email settings are
    /// complete; otherwise alerts go to the log.
    pub fn from_settings(settings: &Settings) -> Result<Self, IsError> {
        let client = IsClient::builder()
            .timeout(settings.request_timeout)
            .retry_config(settings.retry.clone())
            .build()?;
        let store = DataStore::open(&settings.storage)?;

        let notifier: Arc<dyn Notifier> =
            if settings.send_notifications && settings.email.is_complete() {
                info!("Email notifications enabled");
                Arc::new(EmailNotifier::new(&settings.email)?)
            } else {
                info!("Email notifications disabled");
                Arc::new(LogNotifier)
            };

        let config = TrackerConfig {
            max_concurrent: settings.max_concurrent,
            send_summary: settings.send_summary,
        };
        Ok(Self::new(client, store, Some(notifier), config))
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Track every company and return the run summary.
    ///
    /// Outcomes are in the order of `companies` regardless of `max_concurrent`.
    pub async fn run(&self, companies: &[Company]) -> RunSummary {
        let rule = "=".repeat(60);
        info!("{rule}");
        info!("INSIDER SCREENER - TRACKING {} COMPANIES", companies.len());
        info!("{rule}");

        let total = companies.len();
        let outcomes: Vec<CompanyOutcome> = stream::iter(companies.iter().enumerate())
            .map(|(idx, company)| async move {
                info!(
                    "[{}/{total}] Processing: {} ({})",
                    idx + 1,
                    company.name,
                    company.slug
                );
                self.process_company(company).await
            })
            .buffered(self.config.max_concurrent.max(1))
            .collect()
            .await;

        let summary = RunSummary::new(outcomes);
        summary.log_summary();

        if self.config.send_summary
            && let Some(notifier) = &self.notifier
        {
            info!("Sending summary notification...");
            if let Err(e) = notifier.notify_summary(&summary).await {
                warn!("Failed to send summary notification: {e}");
            }
        }
        summary
    }

    /// Run the full pipeline for one company. Never fails; errors end up in the outcome.
    pub async fn process_company(&self, company: &Company) -> CompanyOutcome {
        let _guard = self.locks.lock(&company.slug).await;

        let url = match self.client.company_url(&company.slug) {
            Ok(url) => url,
            Err(e) => {
                error!(company = %company.slug, "Error scraping {}: {e}", company.slug);
                let mut outcome = CompanyOutcome::pending(company, "");
                outcome.error = Some(e.to_string());
                return outcome;
            }
        };

        let mut outcome = CompanyOutcome::pending(company, url.as_str());
        match self.track(company, &url).await {
            Ok((changes, path)) => {
                outcome.success = true;
                outcome.has_changes = changes.has_changes;
                outcome.new_transactions = changes.new_transactions;
                outcome.removed_transactions = changes.removed_transactions;
                outcome.metrics_changed = changes.metrics_changed;
                outcome.current_path = Some(path);
            }
            Err(e) => {
                error!(company = %company.slug, "Error scraping {}: {e}", company.slug);
                outcome.error = Some(e.to_string());
            }
        }
        outcome
    }

    async fn track(
        &self,
        company: &Company,
        url: &Url,
    ) -> Result<(ChangeResult, PathBuf), IsError> {
        let slug = company.slug.as_str();

        let old = self.store.load_current(slug)?;
        match &old {
            Some(prev) => info!(
                company = %slug,
                "Loaded previous data from {}",
                prev.scraped_at.to_rfc3339()
            ),
            None => info!(company = %slug, "No previous data found - first scrape"),
        }

        let new = with_retry(self.client.retry_config(), slug, || {
            scrape::fetch_snapshot(&self.client, slug, url)
        })
        .await?;
        new.validate(slug)?;

        let changes = detect(old.as_ref(), &new);
        log_changes(slug, &changes);

        let path = self.store.save_data(slug, &new, &changes)?;
        if changes.has_changes {
            info!(company = %slug, "Data saved with historical snapshot");
        } else {
            info!(company = %slug, "Current data refreshed");
        }

        let fresh = changes.details.new_transactions_list();
        if changes.new_transactions > 0
            && !fresh.is_empty()
            && let Some(notifier) = &self.notifier
        {
            info!(company = %slug, "Sending notification for {} new transactions", fresh.len());
            if let Err(e) = notifier.notify_new_transactions(company, url.as_str(), fresh).await {
                warn!(company = %slug, "Failed to send notification: {e}");
            }
        }

        info!(company = %slug, "Company: {}", new.company_info.company_name.trim());
        info!(company = %slug, "Total Transactions: {}", new.total_transactions);
        Ok((changes, path))
    }
}

fn log_changes(slug: &str, changes: &ChangeResult) {
    if !changes.has_changes {
        info!(company = %slug, "No changes detected - data is up to date");
        return;
    }
    info!(company = %slug, "CHANGES DETECTED");
    if changes.new_transactions > 0 {
        info!(company = %slug, "  New transactions: {}", changes.new_transactions);
        for txn in changes
            .details
            .new_transactions_list()
            .iter()
            .take(SAMPLE_TRANSACTIONS)
        {
            info!(
                company = %slug,
                "    • {} - {}: {}",
                txn.transaction_date, txn.insider_name, txn.transaction_type
            );
        }
    }
    if changes.removed_transactions > 0 {
        info!(company = %slug, "  Removed transactions: {}", changes.removed_transactions);
    }
    if changes.metrics_changed {
        info!(company = %slug, "  Company metrics changed");
    }
}
