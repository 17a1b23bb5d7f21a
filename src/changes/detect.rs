use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::hash::{TransactionHash, transaction_hash};
use super::model::{ChangeDetails, ChangeResult};
use crate::core::{Snapshot, TransactionRecord};

const INITIAL_LOAD_MESSAGE: &str = "First time scraping this company";

/// Compare the previous snapshot of a company with a fresh one.
///
/// With no previous snapshot everything counts as new and no lists are produced.
/// Otherwise transactions are matched by identity hash only, so a record whose
/// non-identity fields were re-rendered is not reported. Metrics are compared as
/// raw display strings.
pub fn detect(old: Option<&Snapshot>, new: &Snapshot) -> ChangeResult {
    let Some(old) = old else {
        return ChangeResult {
            has_changes: true,
            new_transactions: new.transactions.len(),
            removed_transactions: 0,
            metrics_changed: false,
            details: ChangeDetails::InitialLoad {
                message: INITIAL_LOAD_MESSAGE.to_string(),
            },
        };
    };

    let old_txns = index(&old.transactions);
    let new_txns = index(&new.transactions);

    let new_list = only_in(&new.transactions, &new_txns, &old_txns);
    let removed_list = only_in(&old.transactions, &old_txns, &new_txns);

    let metrics_changed = old.company_info.metrics_differ(&new.company_info);
    let has_changes = !new_list.is_empty() || !removed_list.is_empty() || metrics_changed;

    debug!(
        "Change detection complete: new={}, removed={}, metrics_changed={}",
        new_list.len(),
        removed_list.len(),
        metrics_changed
    );

    ChangeResult {
        has_changes,
        new_transactions: new_list.len(),
        removed_transactions: removed_list.len(),
        metrics_changed,
        details: ChangeDetails::Diff {
            new_transactions_list: new_list,
            removed_transactions_list: removed_list,
            old_metrics: old.company_info.clone(),
            new_metrics: new.company_info.clone(),
        },
    }
}

// Later duplicates of a hash replace earlier ones.
fn index(txns: &[TransactionRecord]) -> HashMap<TransactionHash, &TransactionRecord> {
    txns.iter().map(|t| (transaction_hash(t), t)).collect()
}

/// Records of `side` whose identity is absent from `other`, in first-appearance order.
fn only_in(
    side: &[TransactionRecord],
    side_index: &HashMap<TransactionHash, &TransactionRecord>,
    other: &HashMap<TransactionHash, &TransactionRecord>,
) -> Vec<TransactionRecord> {
    let mut emitted = HashSet::new();
    side.iter()
        .map(transaction_hash)
        .filter(|h| !other.contains_key(h) && emitted.insert(*h))
        .filter_map(|h| side_index.get(&h).map(|t| (*t).clone()))
        .collect()
}
