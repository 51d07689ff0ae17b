//! shelf-sync CLI
//!
//! Copies a PriceCharting collection into a Backloggery library.

mod cli_types;
mod commands;
mod error;
mod logger;
mod prompts;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        Commands::Sync { source, dry_run } => commands::sync::run_sync(source, dry_run, cli.quiet),
        Commands::Diff { source } => commands::sync::run_sync(source, true, cli.quiet),
        Commands::Consoles { unmapped } => {
            commands::consoles::run_consoles(unmapped);
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(),
            ConfigAction::Setup => commands::config::run_config_setup(),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}
