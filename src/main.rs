use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use insider_screener::Settings;
use insider_screener::cli::{self, Cli};
use insider_screener::logging::{self, LogConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    logging::init(&LogConfig::from_env()).map_err(|e| anyhow::anyhow!(e))?;

    // Every store write is a temp file + rename, so aborting between awaits leaves no partial JSON.
    tokio::select! {
        res = cli::execute(cli, Settings::from_env) => {
            if let Err(e) = &res {
                error!("Fatal error: {e:#}");
            }
            res.map(|_| ())
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Scraping interrupted by user");
            Ok(())
        }
    }
}
