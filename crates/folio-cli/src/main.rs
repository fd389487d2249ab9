//! Folio CLI
//!
//! Serve the portfolio API, back up and restore its content.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use folio_cli::{Args, Command, FolioConfig, commands};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; `log` records from library crates are bridged in.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = FolioConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command() {
        Command::Serve => commands::serve(&config).await.context("Server failed")?,
        Command::Backup { out } => {
            let path = commands::backup(&config, out.as_deref())
                .await
                .context("Backup failed")?;
            println!("Backup written: {}", path.display());
        }
        Command::Restore { file } => {
            let report = commands::restore(&config, file.as_deref())
                .await
                .context("Restore failed")?;
            println!("Restore source: {}", report.source.display());
            println!("Pre-restore backup: {}", report.pre_restore.display());
            println!("Restore completed.");
        }
    }

    Ok(())
}
