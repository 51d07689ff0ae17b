use std::cell::Cell;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_sync_core::SyncPlan;
use shelf_sync_scraper::{
    Credentials, LibraryProtocol, Settings, SyncEvent, SyncRequest, run_with_events,
};

use crate::CliError;
use crate::cli_types::SourceArgs;
use crate::prompts;
use crate::spinner::PhaseSpinner;

/// A password is needed to write, or to read the library over the UI.
pub(crate) fn needs_password(protocol: LibraryProtocol, dry_run: bool) -> bool {
    !dry_run || protocol == LibraryProtocol::Ui
}

pub(crate) fn summary_line(added: usize) -> String {
    match added {
        0 => "No games to add".to_string(),
        1 => "1 game added".to_string(),
        n => format!("{n} games added"),
    }
}

/// Whether the plan is followed by add-game submissions.
pub(crate) fn will_write(missing: usize, dry_run: bool) -> bool {
    missing > 0 && !dry_run
}

/// Wording for a run that stopped partway through its batch.
pub(crate) fn partial_line(added: usize, total: usize) -> String {
    format!("{added} of {total} games added before the failure")
}

/// Run the sync (or, with `dry_run`, the diff) command.
pub(crate) fn run_sync(source: SourceArgs, dry_run: bool, quiet: bool) -> Result<(), CliError> {
    let settings =
        Settings::load()?.with_overrides(source.username, source.protocol, source.dedupe);

    let username = match &settings.username {
        Some(u) => u.clone(),
        None => prompts::prompt_username()?,
    };

    let credentials = if needs_password(settings.protocol, dry_run) {
        let password = match Credentials::password_from_env() {
            Some(p) => p,
            None => prompts::prompt_password(&username)?,
        };
        Some(Credentials::new(username.clone(), password))
    } else {
        None
    };

    log::info!(
        "Syncing PriceCharting seller {} into Backloggery user {} {}",
        source.seller.if_supports_color(Stdout, |t| t.cyan()),
        username.if_supports_color(Stdout, |t| t.cyan()),
        format!("(library via {})", settings.protocol).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if dry_run {
        log::info!(
            "{}",
            "Dry run: nothing will be added".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let request = SyncRequest {
        seller: source.seller,
        username: username.clone(),
        credentials,
        dry_run,
    };

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

    let spinner = PhaseSpinner::new(quiet);
    let planned = Cell::new(0);
    spinner.phase("Fetching PriceCharting offers...");

    let result = rt.block_on(async {
        let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel::<SyncEvent>();
        let sync_future = shelf_sync_scraper::run_sync(&settings, request, event_tx);

        run_with_events(sync_future, event_rx, |e| {
            handle_event(&spinner, &username, dry_run, &planned, e)
        })
        .await
    });

    spinner.clear();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(added) = e.added_before_failure() {
                log::warn!(
                    "{} {}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                    partial_line(added, planned.get()),
                );
            }
            return Err(e.into());
        }
    };

    log::info!("");
    report_skipped(&outcome.plan);

    if dry_run {
        print_missing(&outcome.plan);
    } else {
        log::info!(
            "{} {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            summary_line(outcome.added).if_supports_color(Stdout, |t| t.bold()),
        );
    }

    Ok(())
}

fn handle_event(
    spinner: &PhaseSpinner,
    username: &str,
    dry_run: bool,
    planned: &Cell<usize>,
    event: SyncEvent,
) {
    let done = |msg: String| {
        spinner.println(|| {
            log::info!("{} {}", "\u{2714}".if_supports_color(Stdout, |t| t.green()), msg)
        })
    };

    match event {
        SyncEvent::OffersPage { page, total } => {
            spinner.update(format!(
                "Fetching PriceCharting offers: page {} ({} so far)",
                page, total
            ));
        }
        SyncEvent::OffersFetched { total } => {
            done(format!("{} offers fetched", total));
        }
        SyncEvent::LoggingIn => {
            spinner.phase("Logging in to Backloggery...");
        }
        SyncEvent::LoggedIn => {
            done(format!("Logged in as {}", username));
        }
        SyncEvent::FetchingLibrary { protocol } => {
            spinner.phase(format!("Reading Backloggery library ({})...", protocol));
        }
        SyncEvent::LibraryFetched { titles, consoles } => {
            done(format!(
                "{} games on {} consoles already in Backloggery",
                titles, consoles
            ));
        }
        SyncEvent::Planned { missing } => {
            planned.set(missing);
            spinner.println(|| {
                log::info!(
                    "{} {} games missing",
                    "\u{2192}".if_supports_color(Stdout, |t| t.cyan()),
                    missing.if_supports_color(Stdout, |t| t.bold()),
                )
            });
            if will_write(missing, dry_run) {
                spinner.phase("Adding games...");
            }
        }
        SyncEvent::GameAdded { index, total, game } => {
            spinner.println(|| {
                log::info!(
                    "  {} [{}/{}] {} added",
                    "+".if_supports_color(Stdout, |t| t.green()),
                    index + 1,
                    total,
                    game,
                )
            });
            spinner.update(format!("Adding games: {}/{}", index + 1, total));
        }
    }
}

fn report_skipped(plan: &SyncPlan) {
    if plan.skipped.is_empty() {
        return;
    }
    let total: usize = plan.skipped.values().sum();
    log::debug!("{} offers skipped (no Backloggery console):", total);
    for (label, count) in &plan.skipped {
        log::debug!("    {} x{}", label, count);
    }
}

fn print_missing(plan: &SyncPlan) {
    if plan.missing.is_empty() {
        log::info!("{}", "Nothing missing".if_supports_color(Stdout, |t| t.green()));
        return;
    }
    log::info!(
        "{}",
        format!("Missing from Backloggery ({}):", plan.missing.len())
            .if_supports_color(Stdout, |t| t.bold()),
    );
    for game in &plan.missing {
        log::info!(
            "  {} {}",
            game.name,
            format!("[{}, {}]", game.console, game.region)
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
