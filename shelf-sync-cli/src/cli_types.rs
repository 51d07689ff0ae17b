//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use shelf_sync_scraper::LibraryProtocol;

#[derive(Parser)]
#[command(name = "shelf-sync")]
#[command(
    about = "Copy a PriceCharting collection into a Backloggery library",
    long_about = None
)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by `sync` and `diff`.
#[derive(Args, Clone)]
pub(crate) struct SourceArgs {
    /// PriceCharting seller id whose collection is copied
    #[arg(short, long)]
    pub seller: String,

    /// Backloggery username (defaults to settings or BACKLOGGERY_USERNAME)
    #[arg(short, long)]
    pub username: Option<String>,

    /// How to read the existing library: api or ui
    #[arg(short, long, value_parser = parse_protocol)]
    pub protocol: Option<LibraryProtocol>,

    /// Collapse repeated copies of the same game before writing
    #[arg(long)]
    pub dedupe: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add every collection game that is missing from Backloggery
    Sync {
        #[command(flatten)]
        source: SourceArgs,

        /// Show the missing games without adding them
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Show which collection games are missing from Backloggery
    Diff {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the PriceCharting to Backloggery console table
    Consoles {
        /// Only show PriceCharting labels with no Backloggery console
        #[arg(long)]
        unmapped: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show resolved settings and where each value comes from
    Show,

    /// Interactively write the settings file
    Setup,

    /// Print the settings file path
    Path,
}

fn parse_protocol(s: &str) -> Result<LibraryProtocol, String> {
    s.parse().map_err(|e: shelf_sync_scraper::SyncError| e.to_string())
}
