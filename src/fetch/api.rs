//! JSON:API response shapes of the PUBG API, reduced to the fields the
//! fetcher reads. Unknown fields are ignored.

use serde::Deserialize;

/// Top-level JSON:API document.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    /// Primary data.
    pub data: T,
    /// Side-loaded resources (participants, rosters, assets).
    #[serde(default)]
    pub included: Vec<IncludedResource>,
}

/// A player resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerResource {
    /// Account id, e.g. `account.c0e530e9b7244b358def282782f893af`.
    pub id: String,
    /// Player attributes.
    pub attributes: PlayerAttributes,
    /// Links to recent matches.
    #[serde(default)]
    pub relationships: PlayerRelationships,
}

/// Attributes of a player resource.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    /// In-game name.
    pub name: String,
    /// Shard the account was found on.
    #[serde(default)]
    pub shard_id: Option<String>,
}

/// Relationships of a player resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRelationships {
    /// Recent matches, newest first.
    #[serde(default)]
    pub matches: Relationship,
}

/// A to-many relationship.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// Linked resource identifiers.
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

/// Resource identifier object.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRef {
    /// Resource id.
    pub id: String,
}

/// A match resource.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchResource {
    /// Match id.
    pub id: String,
    /// Match attributes.
    #[serde(default)]
    pub attributes: MatchAttributes,
}

/// Attributes of a match resource.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAttributes {
    /// Internal map name, e.g. `Baltic_Main`.
    #[serde(default)]
    pub map_name: String,
    /// Game mode, e.g. `squad-fpp`.
    #[serde(default)]
    pub game_mode: String,
    /// Match type, e.g. `official`.
    #[serde(default)]
    pub match_type: String,
    /// ISO-8601 start time.
    #[serde(default)]
    pub created_at: String,
    /// Length in seconds.
    #[serde(default)]
    pub duration: u64,
}

/// A side-loaded resource.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    /// Resource type, e.g. `asset`, `participant`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Attributes; only the asset fields are decoded.
    #[serde(default)]
    pub attributes: AssetAttributes,
}

/// Attributes of an asset resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetAttributes {
    /// Asset name; `telemetry` for the telemetry file.
    #[serde(default)]
    pub name: Option<String>,
    /// Download location.
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
}

impl Document<MatchResource> {
    /// URL of the telemetry asset, if the match lists one.
    #[must_use]
    pub fn telemetry_url(&self) -> Option<&str> {
        self.included
            .iter()
            .find(|r| r.kind == "asset" && r.attributes.name.as_deref() == Some("telemetry"))
            .and_then(|r| r.attributes.url.as_deref())
    }
}
