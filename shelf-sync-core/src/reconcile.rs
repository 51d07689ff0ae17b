//! Decide which canonical games are missing from the destination.

use std::collections::HashSet;

use crate::game::{DestinationLibrary, Game};

/// Games from `canonical` that the destination does not have yet.
///
/// A game is left out iff `existing` has an entry for its console that
/// contains a title exactly equal to its name. Region plays no part, and
/// comparison is case-sensitive. Input order is preserved.
pub fn diff(canonical: &[Game], existing: &DestinationLibrary) -> Vec<Game> {
    canonical
        .iter()
        .filter(|game| !existing.contains(&game.console, &game.name))
        .cloned()
        .collect()
}

/// Collapse repeated `(name, console)` keys, keeping the first occurrence.
///
/// The source happily lists the same game twice (two copies in a collection);
/// without this the writer would add it twice.
pub fn dedupe_games(games: Vec<Game>) -> Vec<Game> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    games
        .into_iter()
        .filter(|g| seen.insert((g.name.clone(), g.console.clone())))
        .collect()
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
