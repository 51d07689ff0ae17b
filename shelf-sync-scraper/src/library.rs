//! Reading the games a user already has on Backloggery.
//!
//! Two protocols are supported behind [`LibrarySource`]: the unauthenticated
//! JSON endpoint ([`ApiLibrary`]) and the logged-in "more games" listing
//! ([`UiLibrary`]). Both produce the same [`DestinationLibrary`].

use std::future::Future;

use shelf_sync_core::DestinationLibrary;

use crate::client::{self, join_url};
use crate::error::SyncError;
use crate::html;
use crate::session::BackloggerySession;
use crate::settings::Settings;
use crate::types::{LibraryRequest, LibraryResponse};

const FETCH_LIBRARY_PATH: &str = "/api/fetch_library.php";
const MORE_GAMES_PATH: &str = "/ajax_moregames.php";

/// Something that can list a user's existing Backloggery games by console.
pub trait LibrarySource {
    fn fetch_library(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<DestinationLibrary, SyncError>> + Send;
}

/// Direct data endpoint. Needs no login.
pub struct ApiLibrary {
    http: reqwest::Client,
    url: String,
}

impl ApiLibrary {
    pub fn new(settings: &Settings) -> Result<Self, SyncError> {
        Ok(Self {
            http: client::build_client(false)?,
            url: join_url(&settings.backloggery_url, FETCH_LIBRARY_PATH),
        })
    }
}

impl LibrarySource for ApiLibrary {
    async fn fetch_library(&self, username: &str) -> Result<DestinationLibrary, SyncError> {
        let resp = self
            .http
            .post(&self.url)
            .json(&LibraryRequest::load_user_library(username))
            .send()
            .await?;

        let body: LibraryResponse = client::read_json(resp, "library").await?;
        log::debug!("Library endpoint returned {} entries", body.payload.len());

        Ok(body
            .payload
            .into_iter()
            .map(|entry| (entry.platform_title, entry.title))
            .collect())
    }
}

/// Paged HTML listing, read through a logged-in session.
pub struct UiLibrary<'a> {
    session: &'a BackloggerySession,
    max_pages: usize,
}

impl<'a> UiLibrary<'a> {
    pub fn new(session: &'a BackloggerySession, settings: &Settings) -> Self {
        Self {
            session,
            max_pages: settings.max_pages,
        }
    }

    async fn fetch_page(
        &self,
        username: &str,
        page: usize,
        total: usize,
    ) -> Result<Vec<(String, String)>, SyncError> {
        let page_str = page.to_string();
        let total_str = total.to_string();
        // Blank filters mean "everything".
        let query = [
            ("user", username),
            ("console", ""),
            ("rating", ""),
            ("status", ""),
            ("unplayed", ""),
            ("own", ""),
            ("search", ""),
            ("comments", ""),
            ("region", ""),
            ("region_u", "0"),
            ("wish", ""),
            ("alpha", ""),
            ("temp_sys", "ZZZ"),
            ("total", total_str.as_str()),
            ("aid", "1"),
            ("ajid", page_str.as_str()),
        ];

        let resp = self
            .session
            .http()
            .get(self.session.url(MORE_GAMES_PATH))
            .query(&query)
            .send()
            .await?;

        if self.session.is_login_page(resp.url()) {
            return Err(SyncError::auth("session expired while reading the library"));
        }

        let body = client::read_body(resp, "games listing").await?;
        Ok(parse_gameboxes(&body))
    }
}

impl LibrarySource for UiLibrary<'_> {
    async fn fetch_library(&self, username: &str) -> Result<DestinationLibrary, SyncError> {
        let mut library = DestinationLibrary::new();

        for page in 0..self.max_pages {
            let entries = self.fetch_page(username, page, library.len()).await?;
            log::debug!("Listing page {} returned {} games", page + 1, entries.len());
            if entries.is_empty() {
                return Ok(library);
            }
            for (console, title) in entries {
                library.insert(console, title);
            }
        }

        Err(SyncError::network(format!(
            "page ceiling reached: games listing still had entries after {} pages",
            self.max_pages
        )))
    }
}

/// Extract `(console, title)` from each `<section class="gamebox">`.
///
/// Title is the text of the first `<h2>`; console is the first `<b>` inside
/// `<div class="gamerow">`. Boxes missing either are skipped.
pub fn parse_gameboxes(page: &str) -> Vec<(String, String)> {
    html::blocks(page, "section", Some("gamebox"))
        .into_iter()
        .filter_map(|gamebox| {
            let title = html::blocks(gamebox, "h2", None)
                .first()
                .map(|h2| html::text(h2))?;
            let row = html::blocks(gamebox, "div", Some("gamerow"));
            let console = row
                .first()
                .and_then(|r| {
                    html::blocks(html::inner(r), "b", None)
                        .first()
                        .map(|b| html::text(b))
                })?;
            if title.is_empty() || console.is_empty() {
                log::debug!("Skipping incomplete gamebox");
                return None;
            }
            Some((console, title))
        })
        .collect()
}
