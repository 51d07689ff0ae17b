//! Core data model and reconciliation logic for shelf-sync.
//!
//! Nothing in this crate touches the network: it turns PriceCharting offers
//! into Backloggery-shaped games and decides which of them are missing.

pub mod console_map;
pub mod game;
pub mod normalize;
pub mod plan;
pub mod reconcile;
pub mod region;

pub use console_map::{Mapping, translate};
pub use game::{DestinationLibrary, Game, Offer, OfferPage};
pub use normalize::{Normalized, normalize, normalize_with_report};
pub use plan::{PlanOptions, SyncPlan, build_plan};
pub use reconcile::{dedupe_games, diff};
pub use region::Region;
