use serde::{Deserialize, Serialize};

/// Release regions as offered by Backloggery's region select.
///
/// The numeric codes match the current Backloggery add-game form
/// (`Free=1 .. Asia=8`); older revisions of the site used a zero-based
/// numbering and are not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// Region-free
    Free,
    /// North America
    Na,
    /// Japan
    Japan,
    /// Europe / Australia (PAL)
    Pal,
    /// China
    China,
    /// Korea
    Korea,
    /// Brazil
    Brazil,
    /// Asia (other)
    Asia,
}

/// All region variants in select order.
const ALL_REGIONS: &[Region] = &[
    Region::Free,
    Region::Na,
    Region::Japan,
    Region::Pal,
    Region::China,
    Region::Korea,
    Region::Brazil,
    Region::Asia,
];

impl Region {
    /// Numeric option value used by the destination's region select.
    pub fn code(&self) -> u8 {
        match self {
            Self::Free => 1,
            Self::Na => 2,
            Self::Japan => 3,
            Self::Pal => 4,
            Self::China => 5,
            Self::Korea => 6,
            Self::Brazil => 7,
            Self::Asia => 8,
        }
    }

    /// Label shown next to the option on the destination.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Na => "NA",
            Self::Japan => "Japan",
            Self::Pal => "PAL",
            Self::China => "China",
            Self::Korea => "Korea",
            Self::Brazil => "Brazil",
            Self::Asia => "Asia",
        }
    }

    /// Parse a region back from its numeric option value.
    pub fn from_code(code: u8) -> Option<Self> {
        ALL_REGIONS.iter().copied().find(|r| r.code() == code)
    }

    pub fn all() -> &'static [Region] {
        ALL_REGIONS
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
