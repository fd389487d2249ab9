//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Folio portfolio server
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version, about = "Serve the portfolio API and manage its content", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "FOLIO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands. Defaults to `serve`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the API server
    Serve,

    /// Write a backup of the current content
    Backup {
        /// Output file (default: <backup_dir>/content-backup-<stamp>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Restore content from a backup, saving the current content first
    Restore {
        /// Backup file (default: the newest content-backup-*.json)
        file: Option<PathBuf>,
    },
}

impl Args {
    /// The requested command, `serve` when none was given.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
