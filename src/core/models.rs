use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::IsError;

/* ----- TRANSACTIONS (shared by scrape/, changes/, notify/) ----- */

/// One disclosed insider trade, with every field as displayed by the source.
///
/// Records have no identifier of their own; identity is derived from a subset of
/// fields, see [`crate::changes::transaction_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    pub notification_date: String,
    pub transaction_date: String,
    /// e.g. "Purchase" or "Sale".
    pub transaction_type: String,
    pub insider_name: String,
    pub insider_position: String,
    pub insider_role: String,
    pub additional_info: Option<String>,
    /// Thousands-separated numeral.
    pub number_of_shares: String,
    pub price: String,
    /// `value / number_of_shares` with two decimals; empty when either input was not numeric.
    pub price_calculated: String,
    /// Currency-prefixed numeral.
    pub value: String,
}

impl TransactionRecord {
    /// The fields that make up a record's identity, in hashing order.
    pub fn identity_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("notification_date", self.notification_date.as_str()),
            ("transaction_date", self.transaction_date.as_str()),
            ("insider_name", self.insider_name.as_str()),
            ("number_of_shares", self.number_of_shares.as_str()),
            ("value", self.value.as_str()),
        ]
    }
}

/* ----- COMPANY METRICS ----- */

/// Point-in-time aggregate metrics for a company, as displayed.
///
/// Metric fields are optional so that a metric missing from the page compares
/// unequal to any displayed value, including an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyInfo {
    #[serde(default)]
    pub company_name: String,
    pub value_bought: Option<String>,
    pub value_sold: Option<String>,
    pub net_insiders_buying: Option<String>,
    pub trades_count: Option<String>,
    pub insider_activity: Option<String>,
}

impl CompanyInfo {
    /// True when any of the four numeric-ish metrics differs textually.
    ///
    /// `company_name` and `insider_activity` are not compared.
    pub fn metrics_differ(&self, other: &CompanyInfo) -> bool {
        self.value_bought != other.value_bought
            || self.value_sold != other.value_sold
            || self.net_insiders_buying != other.net_insiders_buying
            || self.trades_count != other.trades_count
    }
}

/* ----- SNAPSHOTS (shared by scrape/, store/, tracker/) ----- */

/// One full scrape result for one tracked company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub scraped_at: DateTime<Utc>,
    pub url: String,
    pub company_info: CompanyInfo,
    pub transactions: Vec<TransactionRecord>,
    pub total_transactions: usize,
}

impl Snapshot {
    /// Builds a snapshot stamped with the current time; the total is derived from `transactions`.
    pub fn new(
        url: impl Into<String>,
        company_info: CompanyInfo,
        transactions: Vec<TransactionRecord>,
    ) -> Self {
        Self::at(Utc::now(), url, company_info, transactions)
    }

    /// Like [`Snapshot::new`] with an explicit scrape time.
    pub fn at(
        scraped_at: DateTime<Utc>,
        url: impl Into<String>,
        company_info: CompanyInfo,
        transactions: Vec<TransactionRecord>,
    ) -> Self {
        let total_transactions = transactions.len();
        Self {
            scraped_at,
            url: url.into(),
            company_info,
            transactions,
            total_transactions,
        }
    }

    /// Checks the count invariant and that every transaction carries its identity fields.
    ///
    /// # Errors
    ///
    /// Returns [`IsError::Malformed`] naming `entity` and the first violation found.
    pub fn validate(&self, entity: &str) -> Result<(), IsError> {
        let malformed = |reason: String| IsError::Malformed {
            entity: entity.to_string(),
            reason,
        };

        if self.total_transactions != self.transactions.len() {
            return Err(malformed(format!(
                "total_transactions is {} but {} transactions are present",
                self.total_transactions,
                self.transactions.len()
            )));
        }

        for (idx, txn) in self.transactions.iter().enumerate() {
            if let Some((field, _)) = txn
                .identity_fields()
                .into_iter()
                .find(|(_, v)| v.trim().is_empty())
            {
                return Err(malformed(format!("transaction #{idx} is missing {field}")));
            }
        }
        Ok(())
    }
}
