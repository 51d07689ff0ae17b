//! PriceCharting console labels mapped to Backloggery consoles and regions.
//!
//! Both vocabularies belong to third-party sites and drift independently, so
//! this table is the single place to extend when either side adds a label.
//! Labels are matched exactly: no case folding, no whitespace trimming, and
//! no entity decoding (`Game &amp; Watch` is what PriceCharting sends).

use crate::region::Region;

/// Where a PriceCharting console label lands on Backloggery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// Destination console name and the region to file it under.
    To {
        console: &'static str,
        region: Region,
    },
    /// Known label with no Backloggery equivalent. Offers on it are dropped.
    Unmapped,
}

impl Mapping {
    pub fn destination(&self) -> Option<(&'static str, Region)> {
        match *self {
            Self::To { console, region } => Some((console, region)),
            Self::Unmapped => None,
        }
    }
}

const fn to(console: &'static str, region: Region) -> Mapping {
    Mapping::To { console, region }
}

/// The mapping table, keyed by PriceCharting console label.
pub const CONSOLE_TABLE: &[(&str, Mapping)] = &[
    ("Amiibo", Mapping::Unmapped),
    ("Asian English Switch", to("Nintendo Switch", Region::Korea)),
    ("Game &amp; Watch", to("Miscellaneous", Region::Na)),
    ("GameBoy", to("Game Boy", Region::Na)),
    ("GameBoy Advance", to("Game Boy Advance", Region::Na)),
    ("GameBoy Color", to("Game Boy Color", Region::Na)),
    ("Gamecube", to("Nintendo GameCube", Region::Na)),
    ("JP Nintendo DS", to("Nintendo DS", Region::Japan)),
    ("JP Nintendo Switch", to("Nintendo Switch", Region::Japan)),
    ("JP PC Engine", to("TurboGrafx-16", Region::Japan)),
    ("JP PC Engine CD", to("TurboGrafx-CD", Region::Japan)),
    ("JP Super CD-Rom", to("TurboGrafx-CD", Region::Japan)),
    ("NES", to("Nintendo Entertainment System", Region::Na)),
    ("Nintendo 3DS", to("Nintendo 3DS", Region::Na)),
    ("Nintendo 64", to("Nintendo 64", Region::Na)),
    ("Nintendo DS", to("Nintendo DS", Region::Na)),
    ("Nintendo Switch", to("Nintendo Switch", Region::Na)),
    ("PAL Nintendo Switch", to("Nintendo Switch", Region::Pal)),
    ("PAL Playstation 4", to("PlayStation 4", Region::Pal)),
    ("PAL Xbox 360", to("Xbox 360", Region::Pal)),
    ("PC Games", to("Steam", Region::Na)),
    ("PSP", to("PlayStation Portable", Region::Na)),
    ("JP PSP", to("PlayStation Portable", Region::Japan)),
    ("Playstation", to("PlayStation", Region::Na)),
    ("Playstation 2", to("PlayStation 2", Region::Na)),
    ("Playstation 3", to("PlayStation 3", Region::Na)),
    ("Playstation 4", to("PlayStation 4", Region::Na)),
    ("Playstation 5", to("PlayStation 5", Region::Na)),
    ("Playstation Vita", to("PlayStation Vita", Region::Na)),
    ("Sega CD", to("Sega CD", Region::Na)),
    ("Sega Dreamcast", to("Dreamcast", Region::Na)),
    ("Sega Game Gear", to("Sega Game Gear", Region::Na)),
    ("Sega Genesis", to("Sega Genesis", Region::Na)),
    (
        "Super Famicom",
        to("Super Nintendo Entertainment System", Region::Japan),
    ),
    (
        "Super Nintendo",
        to("Super Nintendo Entertainment System", Region::Na),
    ),
    ("TurboGrafx-16", to("TurboGrafx-16", Region::Na)),
    ("Wii", to("Wii", Region::Na)),
    ("Wii U", to("Wii U", Region::Na)),
    ("WonderSwan", to("WonderSwan", Region::Japan)),
    ("WonderSwan Color", to("WonderSwan Color", Region::Japan)),
    ("Xbox", to("Xbox", Region::Na)),
    ("Xbox One", to("Xbox One", Region::Na)),
];

/// All rows of the table, in declaration order.
pub fn table() -> &'static [(&'static str, Mapping)] {
    CONSOLE_TABLE
}

/// Look up a label, distinguishing "explicitly unmapped" (`Some(Unmapped)`)
/// from "never heard of it" (`None`).
pub fn lookup(source_console: &str) -> Option<Mapping> {
    CONSOLE_TABLE
        .iter()
        .find(|(label, _)| *label == source_console)
        .map(|&(_, mapping)| mapping)
}

/// Translate a PriceCharting label into a Backloggery console and region.
///
/// Returns `None` both for unmapped labels and for labels not in the table.
pub fn translate(source_console: &str) -> Option<(&'static str, Region)> {
    lookup(source_console).and_then(|m| m.destination())
}

/// Distinct destination console names the table can produce, in first-seen order.
pub fn destination_consoles() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for (_, mapping) in CONSOLE_TABLE {
        if let Some((console, _)) = mapping.destination() {
            if !seen.contains(&console) {
                seen.push(console);
            }
        }
    }
    seen
}

#[cfg(test)]
#[path = "tests/console_map_tests.rs"]
mod tests;
