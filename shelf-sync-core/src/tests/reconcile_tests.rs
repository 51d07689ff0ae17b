use super::*;
use crate::region::Region;

fn library(entries: &[(&str, &str)]) -> DestinationLibrary {
    entries
        .iter()
        .map(|(c, t)| (c.to_string(), t.to_string()))
        .collect()
}

#[test]
fn empty_destination_keeps_everything() {
    let canonical = vec![Game::new("Chrono Trigger", "SNES", Region::Na)];
    let missing = diff(&canonical, &DestinationLibrary::new());
    assert_eq!(missing, canonical);
}

#[test]
fn present_title_is_excluded() {
    let canonical = vec![Game::new("Mario", "N64", Region::Na)];
    let existing = library(&[("N64", "Mario")]);
    assert!(diff(&canonical, &existing).is_empty());
}

#[test]
fn same_title_on_other_console_is_still_missing() {
    let canonical = vec![Game::new("Tetris", "Game Boy", Region::Na)];
    let existing = library(&[("NES", "Tetris")]);
    assert_eq!(diff(&canonical, &existing), canonical);
}

#[test]
fn comparison_is_case_sensitive() {
    let canonical = vec![Game::new(
        "EarthBound",
        "Super Nintendo Entertainment System",
        Region::Na,
    )];
    let existing = library(&[("Super Nintendo Entertainment System", "Earthbound")]);
    assert_eq!(diff(&canonical, &existing).len(), 1);
}

#[test]
fn region_does_not_matter() {
    let canonical = vec![Game::new("Bayonetta 2", "Nintendo Switch", Region::Japan)];
    let existing = library(&[("Nintendo Switch", "Bayonetta 2")]);
    assert!(diff(&canonical, &existing).is_empty());
}

#[test]
fn order_is_preserved() {
    let canonical = vec![
        Game::new("D", "Wii", Region::Na),
        Game::new("A", "Wii", Region::Na),
        Game::new("C", "Wii", Region::Na),
        Game::new("B", "Wii", Region::Na),
    ];
    let existing = library(&[("Wii", "A")]);
    let names: Vec<String> = diff(&canonical, &existing)
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(names, vec!["D", "C", "B"]);
}

#[test]
fn diff_is_idempotent_once_applied() {
    let canonical = vec![
        Game::new("Okami", "PlayStation 2", Region::Na),
        Game::new("Ico", "PlayStation 2", Region::Na),
        Game::new("Ikaruga", "Dreamcast", Region::Na),
    ];
    let mut existing = library(&[("PlayStation 2", "Ico")]);

    let first = diff(&canonical, &existing);
    assert_eq!(first.len(), 2);

    existing.extend(first);
    assert!(diff(&canonical, &existing).is_empty());
}

#[test]
fn duplicates_survive_diff_but_not_dedupe() {
    let canonical = vec![
        Game::new("Tetris", "Game Boy", Region::Na),
        Game::new("Pong", "Miscellaneous", Region::Na),
        Game::new("Tetris", "Game Boy", Region::Japan),
    ];
    let missing = diff(&canonical, &DestinationLibrary::new());
    assert_eq!(missing.len(), 3);

    let deduped = dedupe_games(missing);
    assert_eq!(deduped.len(), 2);
    assert_eq!(deduped[0].region, Region::Na);
    assert_eq!(deduped[1].name, "Pong");
}
