// src/changes/model.rs

use serde::{Deserialize, Serialize};

use crate::core::{CompanyInfo, TransactionRecord};

/// Audit payload attached to a [`ChangeResult`] and to each ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeDetails {
    /// First observation of a company; there was nothing to diff against.
    InitialLoad {
        message: String,
    },
    /// A comparison against the previous snapshot.
    Diff {
        new_transactions_list: Vec<TransactionRecord>,
        removed_transactions_list: Vec<TransactionRecord>,
        old_metrics: CompanyInfo,
        new_metrics: CompanyInfo,
    },
}

impl ChangeDetails {
    /// Transactions present now and absent before. Empty on initial load.
    pub fn new_transactions_list(&self) -> &[TransactionRecord] {
        match self {
            ChangeDetails::InitialLoad { .. } => &[],
            ChangeDetails::Diff {
                new_transactions_list,
                ..
            } => new_transactions_list,
        }
    }

    /// Transactions present before and absent now. Empty on initial load.
    pub fn removed_transactions_list(&self) -> &[TransactionRecord] {
        match self {
            ChangeDetails::InitialLoad { .. } => &[],
            ChangeDetails::Diff {
                removed_transactions_list,
                ..
            } => removed_transactions_list,
        }
    }

    pub fn is_initial_load(&self) -> bool {
        matches!(self, ChangeDetails::InitialLoad { .. })
    }
}

/// Outcome of comparing a previous snapshot with a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeResult {
    pub has_changes: bool,
    /// Number of transaction identities that newly appeared.
    pub new_transactions: usize,
    /// Number of transaction identities that disappeared.
    pub removed_transactions: usize,
    pub metrics_changed: bool,
    pub details: ChangeDetails,
}

/// One row of a company's change ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLedgerEntry {
    /// UTC time of the write, `YYYY-MM-DD_HH-MM-SS`.
    pub timestamp: String,
    /// `scraped_at` of the snapshot that produced the change.
    pub scraped_at: String,
    pub new_transactions: usize,
    pub removed_transactions: usize,
    #[serde(default)]
    pub metrics_changed: bool,
    pub details: ChangeDetails,
}

impl ChangeLedgerEntry {
    pub fn from_change(
        timestamp: impl Into<String>,
        scraped_at: impl Into<String>,
        change: &ChangeResult,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            scraped_at: scraped_at.into(),
            new_transactions: change.new_transactions,
            removed_transactions: change.removed_transactions,
            metrics_changed: change.metrics_changed,
            details: change.details.clone(),
        }
    }
}

/// The bounded change history of one company, oldest entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLedger {
    pub company: String,
    pub changes: Vec<ChangeLedgerEntry>,
}

impl ChangeLedger {
    pub fn empty(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            changes: Vec::new(),
        }
    }

    /// Appends `entry` and drops the oldest entries beyond `max_entries`.
    pub fn push_bounded(&mut self, entry: ChangeLedgerEntry, max_entries: usize) {
        self.changes.push(entry);
        if self.changes.len() > max_entries {
            let excess = self.changes.len() - max_entries;
            self.changes.drain(..excess);
        }
    }
}
