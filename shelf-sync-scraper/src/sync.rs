//! The whole run: fetch offers, read the library, diff, and write back.

use shelf_sync_core::{DestinationLibrary, Game, PlanOptions, SyncPlan, build_plan};
use tokio::sync::mpsc;

use crate::credentials::Credentials;
use crate::error::SyncError;
use crate::library::{ApiLibrary, LibrarySource, UiLibrary};
use crate::pricing::PricingClient;
use crate::session::BackloggerySession;
use crate::settings::{LibraryProtocol, Settings};
use crate::writer::GameWriter;

/// What to sync and how.
#[derive(Debug)]
pub struct SyncRequest {
    /// PriceCharting seller id.
    pub seller: String,
    /// Backloggery username whose library is compared against.
    pub username: String,
    /// Needed to write, and to read the library over the UI protocol.
    pub credentials: Option<Credentials>,
    /// Stop after planning.
    pub dry_run: bool,
}

/// Progress events emitted during a run, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// An offers page arrived.
    OffersPage { page: usize, total: usize },
    OffersFetched { total: usize },
    LoggingIn,
    LoggedIn,
    FetchingLibrary { protocol: LibraryProtocol },
    LibraryFetched { titles: usize, consoles: usize },
    /// The missing set is known; nothing has been written yet.
    Planned { missing: usize },
    GameAdded { index: usize, total: usize, game: Game },
}

/// Result of a run that did not abort.
#[derive(Debug)]
pub struct SyncOutcome {
    pub plan: SyncPlan,
    /// Games written to Backloggery (always 0 for a dry run).
    pub added: usize,
}

/// Run a full sync against `settings`, reporting progress on `events`.
///
/// The Backloggery session, when one is opened, lives only inside this call
/// and is dropped on every exit path.
pub async fn run_sync(
    settings: &Settings,
    request: SyncRequest,
    events: mpsc::UnboundedSender<SyncEvent>,
) -> Result<SyncOutcome, SyncError> {
    let emit = |e: SyncEvent| {
        let _ = events.send(e);
    };
    let SyncRequest {
        seller,
        username,
        mut credentials,
        dry_run,
    } = request;

    let pricing = PricingClient::new(settings)?;
    let offers = pricing
        .fetch_all_offers_with_progress(&seller, |page, total| {
            emit(SyncEvent::OffersPage { page, total })
        })
        .await?;
    emit(SyncEvent::OffersFetched {
        total: offers.len(),
    });

    // The UI protocol needs the session before reading anything.
    let mut session = None;
    if settings.protocol == LibraryProtocol::Ui {
        let creds = credentials.take().ok_or_else(|| {
            SyncError::Config("The ui protocol needs a Backloggery password".to_string())
        })?;
        session = Some(login(settings, creds, &emit).await?);
    }

    emit(SyncEvent::FetchingLibrary {
        protocol: settings.protocol,
    });
    let library = match &session {
        Some(s) => fetch_library(&UiLibrary::new(s, settings), &username).await?,
        None => fetch_library(&ApiLibrary::new(settings)?, &username).await?,
    };
    emit(SyncEvent::LibraryFetched {
        titles: library.len(),
        consoles: library.console_count(),
    });

    let plan = build_plan(
        &offers,
        &library,
        PlanOptions {
            dedupe: settings.dedupe,
        },
    );
    emit(SyncEvent::Planned {
        missing: plan.missing.len(),
    });

    if dry_run {
        return Ok(SyncOutcome { plan, added: 0 });
    }

    let session = match session {
        Some(s) => s,
        None => {
            let creds = credentials.take().ok_or_else(|| {
                SyncError::Config("Adding games needs a Backloggery password".to_string())
            })?;
            login(settings, creds, &emit).await?
        }
    };

    let total = plan.missing.len();
    let added = GameWriter::new(settings)
        .add_games_with_progress(&session, &plan.missing, |index, game| {
            emit(SyncEvent::GameAdded {
                index,
                total,
                game: game.clone(),
            })
        })
        .await?;

    Ok(SyncOutcome { plan, added })
}

async fn login(
    settings: &Settings,
    credentials: Credentials,
    emit: &impl Fn(SyncEvent),
) -> Result<BackloggerySession, SyncError> {
    emit(SyncEvent::LoggingIn);
    let session = BackloggerySession::login(settings, credentials).await?;
    emit(SyncEvent::LoggedIn);
    Ok(session)
}

async fn fetch_library<S: LibrarySource>(
    source: &S,
    username: &str,
) -> Result<DestinationLibrary, SyncError> {
    source.fetch_library(username).await
}
