//! Synthetic player records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AccountId;

/// Platform a player account lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    /// PC via Steam.
    Steam,
    /// Xbox.
    Xbox,
    /// PlayStation.
    PlayStation,
}

impl Platform {
    /// Every platform.
    pub const ALL: [Self; 3] = [Self::Steam, Self::Xbox, Self::PlayStation];
}

/// Home region of a player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// North America.
    #[serde(rename = "NA")]
    NorthAmerica,
    /// Europe.
    #[serde(rename = "EU")]
    Europe,
    /// Asia.
    #[serde(rename = "AS")]
    Asia,
    /// Oceania.
    #[serde(rename = "OC")]
    Oceania,
    /// South America.
    #[serde(rename = "SA")]
    SouthAmerica,
}

impl Region {
    /// Every region.
    pub const ALL: [Self; 5] = [
        Self::NorthAmerica,
        Self::Europe,
        Self::Asia,
        Self::Oceania,
        Self::SouthAmerica,
    ];
}

/// A generated player. Created once per run and only referenced by
/// events, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique account id.
    pub account_id: AccountId,
    /// Display name, `Player_NNNN`.
    pub player_name: String,
    /// Account platform.
    pub platform: Platform,
    /// Account region.
    pub region: Region,
    /// When the record was produced.
    pub ingested_at: DateTime<Utc>,
}

impl Player {
    /// Display name for the `index`-th generated player.
    #[must_use]
    pub fn name_for(index: usize) -> String {
        format!("Player_{index:04}")
    }
}
