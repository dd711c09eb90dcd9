//! Synthetic match metadata.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{MapName, MatchId};

/// Team composition of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One player per team.
    Solo,
    /// Two players per team.
    Duo,
    /// Four players per team.
    Squad,
}

impl GameMode {
    /// Every game mode.
    pub const ALL: [Self; 3] = [Self::Solo, Self::Duo, Self::Squad];

    /// Players per team, as reported in `LogMatchStart.teamSize`.
    #[must_use]
    pub const fn team_size(&self) -> u8 {
        match self {
            Self::Solo => 1,
            Self::Duo => 2,
            Self::Squad => 4,
        }
    }
}

/// Only official matches are synthesized.
pub const MATCH_TYPE_OFFICIAL: &str = "Official";

/// Host serving telemetry assets.
pub const TELEMETRY_CDN: &str = "https://telemetry-cdn.pubg.com";

/// A generated match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique match id.
    pub match_id: MatchId,
    /// Map the match is played on.
    pub map_name: MapName,
    /// Team composition.
    pub game_mode: GameMode,
    /// Always [`MATCH_TYPE_OFFICIAL`].
    pub match_type: String,
    /// Start of the match, within the last week.
    pub created_at: DateTime<Utc>,
    /// Length of the match in seconds.
    pub duration: u32,
    /// Where the telemetry asset would be published.
    pub telemetry_url: String,
    /// When the record was produced.
    pub ingested_at: DateTime<Utc>,
}

impl Match {
    /// Telemetry asset URL for a match id.
    #[must_use]
    pub fn telemetry_url_for(match_id: MatchId) -> String {
        format!("{TELEMETRY_CDN}/{match_id}-telemetry.json")
    }

    /// End of the match window (`created_at + duration`).
    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(i64::from(self.duration))
    }

    /// Returns `true` if `at` falls within the match window, bounds
    /// included.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.created_at <= at && at <= self.ended_at()
    }
}
