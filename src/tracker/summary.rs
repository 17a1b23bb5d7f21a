use std::path::PathBuf;

use tracing::info;

use crate::companies::Company;

/// What happened to one company during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyOutcome {
    pub slug: String,
    pub name: String,
    /// Page the snapshot was scraped from; linked from notifications.
    pub source_url: String,
    pub success: bool,
    pub has_changes: bool,
    pub new_transactions: usize,
    pub removed_transactions: usize,
    pub metrics_changed: bool,
    /// Where the current snapshot was written, when it was.
    pub current_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl CompanyOutcome {
    pub(crate) fn pending(company: &Company, source_url: impl Into<String>) -> Self {
        Self {
            slug: company.slug.clone(),
            name: company.name.clone(),
            source_url: source_url.into(),
            success: false,
            has_changes: false,
            new_transactions: 0,
            removed_transactions: 0,
            metrics_changed: false,
            current_path: None,
            error: None,
        }
    }
}

/// All outcomes of a run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<CompanyOutcome>,
}

impl RunSummary {
    pub fn new(outcomes: Vec<CompanyOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn tracked(&self) -> usize {
        self.outcomes.len()
    }

    pub fn successful(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.tracked() - self.successful()
    }

    pub fn with_changes(&self) -> impl Iterator<Item = &CompanyOutcome> {
        self.outcomes.iter().filter(|o| o.has_changes)
    }

    /// Companies that changed and gained at least one transaction.
    pub fn companies_with_new_transactions(&self) -> impl Iterator<Item = &CompanyOutcome> {
        self.with_changes().filter(|o| o.new_transactions > 0)
    }

    pub fn total_new_transactions(&self) -> usize {
        self.outcomes.iter().map(|o| o.new_transactions).sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CompanyOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    pub fn log_summary(&self) {
        let rule = "=".repeat(60);
        info!("{rule}");
        info!("SUMMARY");
        info!("{rule}");
        info!("Companies tracked: {}", self.tracked());
        info!("Successful: {}", self.successful());
        if self.failed() > 0 {
            info!("Failed: {}", self.failed());
        }
        info!("Companies with changes: {}", self.with_changes().count());
        info!("Total new transactions: {}", self.total_new_transactions());

        if self.with_changes().next().is_some() {
            info!("Companies updated:");
            for o in self.with_changes() {
                info!("  • {} ({}): {} new", o.name, o.slug, o.new_transactions);
            }
        }
        if self.failed() > 0 {
            info!("Failed companies:");
            for o in self.failures() {
                info!(
                    "  • {} ({}): {}",
                    o.name,
                    o.slug,
                    o.error.as_deref().unwrap_or("unknown error")
                );
            }
        }
        info!("{rule}");
    }
}
