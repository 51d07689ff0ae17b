use std::collections::BTreeMap;

use crate::console_map;
use crate::game::{Game, Offer};

/// Normalizer output with a tally of the console labels that were dropped.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub games: Vec<Game>,
    /// Source console label -> number of offers skipped for it.
    pub skipped: BTreeMap<String, usize>,
}

impl Normalized {
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Convert offers into canonical games, dropping offers whose console has
/// no destination equivalent. Order is preserved.
pub fn normalize(offers: &[Offer]) -> Vec<Game> {
    normalize_with_report(offers).games
}

/// Same as [`normalize`], also counting skipped offers per source label.
pub fn normalize_with_report(offers: &[Offer]) -> Normalized {
    let mut out = Normalized::default();

    for offer in offers {
        match console_map::translate(&offer.console_name) {
            Some((console, region)) => {
                out.games
                    .push(Game::new(offer.product_name.clone(), console, region));
            }
            None => {
                log::debug!(
                    "No destination console for '{}' ({})",
                    offer.console_name,
                    offer.product_name
                );
                *out.skipped.entry(offer.console_name.clone()).or_default() += 1;
            }
        }
    }

    out
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
