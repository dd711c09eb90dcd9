//! Domain layer: players, matches, catalogs and telemetry events.
//!
//! Everything here is plain data. Records are created by the
//! [`crate::generator`] (or decoded by [`crate::fetch`]) and handed to a
//! [`crate::sink`] unchanged.

pub mod catalog;
pub mod game_match;
pub mod ids;
pub mod player;
pub mod telemetry_event;

pub use catalog::{Catalog, Item, MapBounds, MapName};
pub use game_match::{GameMode, Match};
pub use ids::{AccountId, MatchId};
pub use player::{Platform, Player, Region};
pub use telemetry_event::{Character, EventData, EventKind, Location, TelemetryEvent};
