//! Command-line interface

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{ArgGroup, Parser};
use tracing::{error, info};

use crate::companies::{self, Company};
use crate::core::{IsError, Settings};
use crate::tracker::{RunSummary, Tracker};

/// Insider Screener CLI
#[derive(Parser, Debug)]
#[command(name = "insider-screener")]
#[command(about = "Track insider trading disclosures with historical change tracking")]
#[command(version)]
#[command(group(ArgGroup::new("mode").required(true).args(["all", "companies", "list"])))]
pub struct Cli {
    /// Scrape all tracked companies
    #[arg(long)]
    pub all: bool,

    /// Scrape specific companies by slug (e.g. afry-ab bouvet-asa)
    #[arg(long, num_args = 1.., value_name = "SLUG")]
    pub companies: Vec<String>,

    /// List all tracked companies
    #[arg(long)]
    pub list: bool,

    /// Base data directory (overrides DATA_DIR)
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Ledger entries kept per company (overrides MAX_CHANGE_HISTORY)
    #[arg(long, value_name = "N")]
    pub max_change_history: Option<usize>,
}

impl Cli {
    /// Apply command-line overrides on top of environment settings.
    pub fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            settings.storage.base_dir = dir.clone();
        }
        if let Some(n) = self.max_change_history {
            if n == 0 {
                bail!("--max-change-history must be at least 1");
            }
            settings.storage.max_change_history = n;
        }
        Ok(())
    }
}

/// Run the command. Returns the run summary, or `None` for `--list`.
///
/// `load_settings` is only called when companies are tracked, so `--list`
/// works with a broken environment.
pub async fn execute<F>(cli: Cli, load_settings: F) -> Result<Option<RunSummary>>
where
    F: FnOnce() -> Result<Settings, IsError>,
{
    let all = companies::default_companies();
    if cli.list {
        list_companies(&all);
        return Ok(None);
    }

    let mut settings = load_settings()?;
    cli.apply(&mut settings)?;

    let selected = if cli.all {
        info!("Scraping all {} companies", all.len());
        all
    } else {
        let selected = companies::select(&all, &cli.companies).inspect_err(|e| {
            error!("{e}");
            info!("Use --list to see all tracked companies");
        })?;
        info!("Scraping {} selected companies", selected.len());
        selected
    };

    let tracker = Tracker::from_settings(&settings)?;
    Ok(Some(tracker.run(&selected).await))
}

fn list_companies(all: &[Company]) {
    let rule = "=".repeat(60);
    println!("\nTracked Companies ({}):", all.len());
    println!("{rule}");
    for company in all {
        println!("  {:<40} {}", company.slug, company.name);
    }
    println!("{rule}");
}
