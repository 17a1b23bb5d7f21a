//! insider-screener: tracks insider-trading disclosures per company.
//!
//! Each run scrapes the disclosure table of every tracked company, compares it
//! with the previous run by transaction identity, and persists:
//! - the current snapshot (overwritten every run),
//! - a timestamped history copy whenever something changed,
//! - a bounded per-company change ledger.
//!
//! Newly observed transactions are handed to a [`notify::Notifier`].
//!
//! ```no_run
//! # async fn demo() -> Result<(), insider_screener::IsError> {
//! use insider_screener::{Settings, Tracker, companies};
//!
//! let settings = Settings::from_env()?;
//! let tracker = Tracker::from_settings(&settings)?;
//! let summary = tracker.run(&companies::default_companies()).await;
//! println!("{} new transactions", summary.total_new_transactions());
//! # Ok(()) }
//! ```

pub mod changes;
pub mod cli;
pub mod companies;
pub mod core;
pub mod logging;
pub mod notify;
pub mod scrape;
pub mod store;
pub mod tracker;

pub use changes::{
    ChangeDetails, ChangeLedger, ChangeLedgerEntry, ChangeResult, TransactionHash, detect,
    transaction_hash,
};
pub use companies::Company;
pub use crate::core::{
    Backoff, CompanyInfo, EmailSettings, IsClient, IsClientBuilder, IsError, RetryConfig,
    Settings, Snapshot, StorageConfig, TransactionRecord,
};
pub use notify::{EmailNotifier, LogNotifier, Notifier};
pub use store::DataStore;
pub use tracker::{CompanyOutcome, RunSummary, Tracker, TrackerConfig};
