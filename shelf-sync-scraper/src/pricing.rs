//! PriceCharting seller offers.

use shelf_sync_core::{Offer, OfferPage};

use crate::client::{self, join_url};
use crate::error::SyncError;
use crate::settings::Settings;

/// Status filter that selects a seller's collection rather than items for sale.
const COLLECTION_STATUS: &str = "collection";

/// Client for the PriceCharting offers endpoint.
pub struct PricingClient {
    http: reqwest::Client,
    offers_url: String,
    max_pages: usize,
}

impl PricingClient {
    pub fn new(settings: &Settings) -> Result<Self, SyncError> {
        Ok(Self {
            http: client::build_client(false)?,
            offers_url: join_url(&settings.pricecharting_url, "/offers"),
            max_pages: settings.max_pages,
        })
    }

    /// Fetch one page. `cursor` is the token from the previous page.
    pub async fn fetch_page(
        &self,
        seller: &str,
        cursor: Option<&str>,
    ) -> Result<OfferPage, SyncError> {
        let mut query = vec![("seller", seller), ("status", COLLECTION_STATUS)];
        if let Some(c) = cursor {
            query.push(("cursor", c));
        }

        let resp = self
            .http
            .get(&self.offers_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&query)
            .send()
            .await?;

        client::read_json(resp, "offers page").await
    }

    /// Fetch every page for `seller`, following cursors until one is null.
    pub async fn fetch_all_offers(&self, seller: &str) -> Result<Vec<Offer>, SyncError> {
        self.fetch_all_offers_with_progress(seller, |_, _| {}).await
    }

    /// Like [`fetch_all_offers`](Self::fetch_all_offers), calling
    /// `on_page(page_number, offers_so_far)` after each page.
    pub async fn fetch_all_offers_with_progress(
        &self,
        seller: &str,
        mut on_page: impl FnMut(usize, usize),
    ) -> Result<Vec<Offer>, SyncError> {
        let mut offers = Vec::new();
        let mut cursor: Option<String> = None;

        for page_number in 1..=self.max_pages {
            let page = self.fetch_page(seller, cursor.as_deref()).await?;
            cursor = page.next_cursor().map(str::to_string);
            offers.extend(page.offers);

            log::debug!(
                "Offers page {} fetched ({} offers so far, more: {})",
                page_number,
                offers.len(),
                cursor.is_some()
            );
            on_page(page_number, offers.len());

            if cursor.is_none() {
                return Ok(offers);
            }
        }

        Err(SyncError::network(format!(
            "page ceiling reached: PriceCharting still returned a cursor after {} pages",
            self.max_pages
        )))
    }
}
