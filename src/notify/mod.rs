//! Delivery of new-transaction alerts and run summaries.

mod email;
pub mod format;

pub use email::EmailNotifier;

use std::future::Future;
use std::pin::Pin;

use tracing::info;

use crate::companies::Company;
use crate::core::{IsError, TransactionRecord};
use crate::tracker::RunSummary;

/// Boxed future returned by [`Notifier`] methods.
pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = Result<(), IsError>> + Send + 'a>>;

/// Something that can tell a human about new transactions.
///
/// Implementations must treat an empty transaction list as a no-op. Errors are
/// reported to the caller, which logs them; they never fail a tracked company.
pub trait Notifier: Send + Sync {
    /// Alert about transactions newly observed for `company`.
    fn notify_new_transactions<'a>(
        &'a self,
        company: &'a Company,
        source_url: &'a str,
        transactions: &'a [TransactionRecord],
    ) -> NotifyFuture<'a>;

    /// Report the outcome of a full run.
    fn notify_summary<'a>(&'a self, summary: &'a RunSummary) -> NotifyFuture<'a>;
}

/// Writes alerts to the log instead of sending them anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_new_transactions<'a>(
        &'a self,
        company: &'a Company,
        _source_url: &'a str,
        transactions: &'a [TransactionRecord],
    ) -> NotifyFuture<'a> {
        Box::pin(async move {
            if transactions.is_empty() {
                return Ok(());
            }
            info!(
                company = %company.slug,
                "{}",
                format::alert_subject(&company.name, transactions.len())
            );
            for txn in transactions {
                info!(
                    company = %company.slug,
                    "  {} {}: {} {} shares, {}",
                    txn.transaction_date,
                    txn.insider_name,
                    txn.transaction_type,
                    txn.number_of_shares,
                    txn.value
                );
            }
            Ok(())
        })
    }

    fn notify_summary<'a>(&'a self, summary: &'a RunSummary) -> NotifyFuture<'a> {
        Box::pin(async move {
            if summary.companies_with_new_transactions().next().is_some() {
                info!("{}", format::summary_subject(summary));
            }
            Ok(())
        })
    }
}
