//! Records shared by both sides of a sync: raw source offers, canonical
//! games in destination vocabulary, and the destination's existing library.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// A seller listing as returned by the PriceCharting offers endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    #[serde(rename = "product-name")]
    pub product_name: String,
    #[serde(rename = "console-name")]
    pub console_name: String,
}

impl Offer {
    pub fn new(product_name: impl Into<String>, console_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            console_name: console_name.into(),
        }
    }
}

/// One page of offers plus the continuation cursor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferPage {
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl OfferPage {
    /// The cursor to follow, if any. Empty strings end pagination the same
    /// way `null` does.
    pub fn next_cursor(&self) -> Option<&str> {
        self.cursor.as_deref().filter(|c| !c.is_empty())
    }
}

/// A game normalized into destination vocabulary, ready to compare or insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Game {
    pub name: String,
    /// Destination console name (never a raw source label).
    pub console: String,
    pub region: Region,
}

impl Game {
    pub fn new(name: impl Into<String>, console: impl Into<String>, region: Region) -> Self {
        Self {
            name: name.into(),
            console: console.into(),
            region,
        }
    }

    /// Identity used for reconciliation. Region is not part of it: the
    /// destination library is not queried per region.
    pub fn key(&self) -> (&str, &str) {
        (&self.name, &self.console)
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}, {}]", self.name, self.console, self.region)
    }
}

/// Titles already present on the destination, grouped by console name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationLibrary {
    by_console: HashMap<String, Vec<String>>,
}

impl DestinationLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a title under `console`, preserving arrival order.
    pub fn insert(&mut self, console: impl Into<String>, title: impl Into<String>) {
        self.by_console
            .entry(console.into())
            .or_default()
            .push(title.into());
    }

    /// Titles recorded for `console`, if the console has any entry at all.
    pub fn titles(&self, console: &str) -> Option<&[String]> {
        self.by_console.get(console).map(Vec::as_slice)
    }

    /// Exact, case-sensitive membership test.
    pub fn contains(&self, console: &str, title: &str) -> bool {
        self.titles(console)
            .is_some_and(|titles| titles.iter().any(|t| t == title))
    }

    /// Total number of titles across all consoles.
    pub fn len(&self) -> usize {
        self.by_console.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn console_count(&self) -> usize {
        self.by_console.len()
    }

    pub fn consoles(&self) -> impl Iterator<Item = &str> {
        self.by_console.keys().map(String::as_str)
    }
}

impl FromIterator<(String, String)> for DestinationLibrary {
    /// Build from `(console, title)` pairs.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut library = Self::new();
        for (console, title) in iter {
            library.insert(console, title);
        }
        library
    }
}

impl Extend<Game> for DestinationLibrary {
    fn extend<I: IntoIterator<Item = Game>>(&mut self, iter: I) {
        for game in iter {
            self.insert(game.console, game.name);
        }
    }
}
