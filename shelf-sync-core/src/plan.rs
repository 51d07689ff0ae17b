use std::collections::BTreeMap;

use crate::game::{DestinationLibrary, Game, Offer};
use crate::normalize::normalize_with_report;
use crate::reconcile::{dedupe_games, diff};

/// Options for building a sync plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Collapse duplicate `(name, console)` entries before writing.
    pub dedupe: bool,
}

/// Everything decided before the destination is touched.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub offers_fetched: usize,
    /// Canonical games after normalization.
    pub canonical: usize,
    /// Source console label -> offers dropped for it.
    pub skipped: BTreeMap<String, usize>,
    /// Titles already on the destination.
    pub existing: usize,
    /// Games to add, in source order.
    pub missing: Vec<Game>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Normalize `offers` and diff them against `library`.
pub fn build_plan(
    offers: &[Offer],
    library: &DestinationLibrary,
    options: PlanOptions,
) -> SyncPlan {
    let normalized = normalize_with_report(offers);
    let mut missing = diff(&normalized.games, library);
    if options.dedupe {
        missing = dedupe_games(missing);
    }

    SyncPlan {
        offers_fetched: offers.len(),
        canonical: normalized.games.len(),
        skipped: normalized.skipped,
        existing: library.len(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;

    #[test]
    fn plan_combines_normalize_and_diff() {
        let offers = vec![
            Offer::new("Chrono Trigger", "Super Nintendo"),
            Offer::new("Zelda", "Amiibo"),
            Offer::new("Super Mario 64", "Nintendo 64"),
            Offer::new("Chrono Trigger", "Super Nintendo"),
        ];
        let mut library = DestinationLibrary::new();
        library.insert("Nintendo 64", "Super Mario 64");

        let plan = build_plan(&offers, &library, PlanOptions::default());
        assert_eq!(plan.offers_fetched, 4);
        assert_eq!(plan.canonical, 3);
        assert_eq!(plan.existing, 1);
        assert_eq!(plan.skipped.get("Amiibo"), Some(&1));
        assert_eq!(plan.missing.len(), 2);

        let deduped = build_plan(&offers, &library, PlanOptions { dedupe: true });
        assert_eq!(
            deduped.missing,
            vec![Game::new(
                "Chrono Trigger",
                "Super Nintendo Entertainment System",
                Region::Na
            )]
        );
    }
}
