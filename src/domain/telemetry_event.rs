//! Telemetry events and their per-kind payloads.
//!
//! A [`TelemetryEvent`] is one timestamped record with a type tag (`_T`)
//! and a payload (`event_data`) whose shape is determined by that tag.
//! Payloads are modelled as [`EventData`], one variant per shape, so the
//! tag written to `_T` is always derived from the payload itself.

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::{AccountId, Item, MapName, MatchId};

/// Every event type of the PUBG telemetry vocabulary.
///
/// Variant names are the literal `_T` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::enum_variant_names)]
pub enum EventKind {
    /// A player was killed.
    LogPlayerKillV2,
    /// A player fired or swung.
    LogPlayerAttack,
    /// A player took damage.
    LogPlayerTakeDamage,
    /// A player was knocked down.
    LogPlayerMakeGroggy,
    /// A knocked player was revived.
    LogPlayerRevive,
    /// Periodic position sample.
    LogPlayerPosition,
    /// Item picked up.
    LogItemPickup,
    /// Item dropped.
    LogItemDrop,
    /// Item equipped.
    LogItemEquip,
    /// Consumable used.
    LogItemUse,
    /// Player entered a vehicle.
    LogVehicleRide,
    /// Player left a vehicle.
    LogVehicleLeave,
    /// Vehicle took damage.
    LogVehicleDamage,
    /// Match start roster.
    LogMatchStart,
    /// Match end.
    LogMatchEnd,
    /// Blue-zone phase change.
    LogPhaseChange,
    /// Player healed.
    LogHeal,
    /// Attachment mounted.
    LogItemAttach,
    /// Attachment removed.
    LogItemDetach,
}

impl EventKind {
    /// Returns the `_T` tag for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LogPlayerKillV2 => "LogPlayerKillV2",
            Self::LogPlayerAttack => "LogPlayerAttack",
            Self::LogPlayerTakeDamage => "LogPlayerTakeDamage",
            Self::LogPlayerMakeGroggy => "LogPlayerMakeGroggy",
            Self::LogPlayerRevive => "LogPlayerRevive",
            Self::LogPlayerPosition => "LogPlayerPosition",
            Self::LogItemPickup => "LogItemPickup",
            Self::LogItemDrop => "LogItemDrop",
            Self::LogItemEquip => "LogItemEquip",
            Self::LogItemUse => "LogItemUse",
            Self::LogVehicleRide => "LogVehicleRide",
            Self::LogVehicleLeave => "LogVehicleLeave",
            Self::LogVehicleDamage => "LogVehicleDamage",
            Self::LogMatchStart => "LogMatchStart",
            Self::LogMatchEnd => "LogMatchEnd",
            Self::LogPhaseChange => "LogPhaseChange",
            Self::LogHeal => "LogHeal",
            Self::LogItemAttach => "LogItemAttach",
            Self::LogItemDetach => "LogItemDetach",
        }
    }
}

/// Point in a map. `x`/`y` lie within the map bounds, `z` in `[0, 1000]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// East-west coordinate (cm).
    pub x: f64,
    /// North-south coordinate (cm).
    pub y: f64,
    /// Elevation (cm).
    pub z: f64,
}

/// Point-in-time copy of a player plus random game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Account of the player this snapshot was taken from.
    pub account_id: AccountId,
    /// Player display name.
    pub name: String,
    /// Team number, `[1, 25]`.
    pub team_id: u8,
    /// Remaining health, `[0, 100]`.
    pub health: f64,
    /// Where the player stands.
    pub location: Location,
    /// Current placement, `[1, 100]`.
    pub ranking: u8,
    /// Inside the shrinking blue zone.
    pub is_in_blue_zone: bool,
    /// Inside a red (bombardment) zone.
    pub is_in_red_zone: bool,
}

/// `common` block present on every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Common {
    /// Game phase indicator.
    pub is_game: f64,
}

/// One roster entry of `LogMatchStart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    /// Snapshot of the rostered player.
    pub character: Character,
    /// Always empty in synthetic data.
    pub primary_weapon_first: String,
    /// Always empty in synthetic data.
    pub primary_weapon_second: String,
    /// Always empty in synthetic data.
    pub secondary_weapon: String,
    /// Always 0 in synthetic data.
    pub spawn_kit_index: u32,
}

impl RosterEntry {
    /// Roster entry with an empty loadout.
    #[must_use]
    pub fn unarmed(character: Character) -> Self {
        Self {
            character,
            primary_weapon_first: String::new(),
            primary_weapon_second: String::new(),
            secondary_weapon: String::new(),
            spawn_kit_index: 0,
        }
    }
}

/// Payload of `LogMatchStart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStartData {
    /// Map of the match.
    pub map_name: MapName,
    /// Weather preset.
    pub weather_id: String,
    /// Players present at the start.
    pub characters: Vec<RosterEntry>,
    /// Camera perspective.
    pub camera_view_behaviour: String,
    /// Players per team.
    pub team_size: u8,
    /// Custom game flag.
    pub is_custom_game: bool,
    /// Event mode flag.
    pub is_event_mode: bool,
}

/// Payload of `LogPlayerKillV2`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KillData {
    /// Attack correlation id.
    pub attack_id: u32,
    /// Who scored the kill.
    pub killer: Character,
    /// Who died. May be the same account as `killer`.
    pub victim: Character,
    /// Hit body part.
    pub damage_reason: String,
    /// Damage source class.
    pub damage_type_category: String,
    /// Weapon blueprint id.
    pub damage_causer_name: String,
    /// Shot distance.
    pub distance: f64,
    /// Final blow damage.
    pub damage: f64,
}

/// Payload of `LogPlayerTakeDamage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageData {
    /// Attack correlation id.
    pub attack_id: u32,
    /// Who dealt the damage.
    pub attacker: Character,
    /// Who took it. May be the same account as `attacker`.
    pub victim: Character,
    /// Damage source class.
    pub damage_type_category: String,
    /// Hit body part.
    pub damage_reason: String,
    /// Damage dealt.
    pub damage: f64,
    /// Shot distance.
    pub distance: f64,
}

/// Item with a stack size, as carried by `LogItemPickup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedItem {
    /// The item.
    #[serde(flatten)]
    pub item: Item,
    /// Number of units picked up, `[1, 10]`.
    pub stack_count: u8,
}

/// Payload of `LogItemPickup`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPickupData {
    /// Who picked the item up.
    pub character: Character,
    /// What was picked up.
    pub item: StackedItem,
}

/// Payload of `LogItemDrop` and `LogItemEquip`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemData {
    /// Acting player.
    pub character: Character,
    /// Item involved.
    pub item: Item,
}

/// Payload of `LogPlayerPosition`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionData {
    /// Sampled player.
    pub character: Character,
    /// Seconds since match start, `[0, 2400]`.
    pub elapsed_time: u32,
    /// Players still alive, `[10, 100]`.
    pub num_alive_players: u8,
}

/// Payload carrying only the acting character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterData {
    /// Acting player.
    pub character: Character,
}

/// Event payload, one variant per payload shape.
///
/// Serializes as the bare payload object; the variant decides the `_T`
/// tag through [`EventData::kind`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// `LogMatchStart`.
    MatchStart(MatchStartData),
    /// `LogPlayerKillV2`.
    Kill(KillData),
    /// `LogPlayerTakeDamage`.
    TakeDamage(DamageData),
    /// `LogItemPickup`.
    ItemPickup(ItemPickupData),
    /// `LogItemDrop`.
    ItemDrop(ItemData),
    /// `LogItemEquip`.
    ItemEquip(ItemData),
    /// `LogPlayerPosition`.
    Position(PositionData),
    /// Any other kind: the acting character only.
    CharacterOnly {
        /// Event kind written to `_T`.
        kind: EventKind,
        /// Payload.
        data: CharacterData,
    },
}

impl EventData {
    /// Returns the event kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::MatchStart(_) => EventKind::LogMatchStart,
            Self::Kill(_) => EventKind::LogPlayerKillV2,
            Self::TakeDamage(_) => EventKind::LogPlayerTakeDamage,
            Self::ItemPickup(_) => EventKind::LogItemPickup,
            Self::ItemDrop(_) => EventKind::LogItemDrop,
            Self::ItemEquip(_) => EventKind::LogItemEquip,
            Self::Position(_) => EventKind::LogPlayerPosition,
            Self::CharacterOnly { kind, .. } => *kind,
        }
    }
}

impl Serialize for EventData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::MatchStart(data) => data.serialize(serializer),
            Self::Kill(data) => data.serialize(serializer),
            Self::TakeDamage(data) => data.serialize(serializer),
            Self::ItemPickup(data) => data.serialize(serializer),
            Self::ItemDrop(data) | Self::ItemEquip(data) => data.serialize(serializer),
            Self::Position(data) => data.serialize(serializer),
            Self::CharacterOnly { data, .. } => data.serialize(serializer),
        }
    }
}

/// One synthesized telemetry record.
///
/// Serialized with the PUBG field names:
/// `{_D, _T, common, match_id, event_data, ingested_at}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryEvent {
    /// Event time (`_D`).
    pub timestamp: DateTime<Utc>,
    /// `common` block.
    pub common: Common,
    /// Match the event belongs to.
    pub match_id: MatchId,
    /// Kind-specific payload (`event_data`).
    pub data: EventData,
    /// When the record was produced.
    pub ingested_at: DateTime<Utc>,
}

impl TelemetryEvent {
    /// Returns the `_T` kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.data.kind()
    }
}

impl Serialize for TelemetryEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TelemetryEvent", 6)?;
        state.serialize_field("_D", &self.timestamp)?;
        state.serialize_field("_T", &self.kind())?;
        state.serialize_field("common", &self.common)?;
        state.serialize_field("match_id", &self.match_id)?;
        state.serialize_field("event_data", &self.data)?;
        state.serialize_field("ingested_at", &self.ingested_at)?;
        state.end()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn character() -> Character {
        Character {
            account_id: AccountId::new(),
            name: "Player_0001".to_string(),
            team_id: 3,
            health: 55.5,
            location: Location {
                x: 1.0,
                y: 2.0,
                z: 3.0,
            },
            ranking: 12,
            is_in_blue_zone: false,
            is_in_red_zone: true,
        }
    }

    fn to_value(event: &TelemetryEvent) -> serde_json::Value {
        let Ok(value) = serde_json::to_value(event) else {
            panic!("serialization failed");
        };
        value
    }

    #[test]
    fn tag_comes_from_payload() {
        let event = TelemetryEvent {
            timestamp: Utc::now(),
            common: Common { is_game: 1.5 },
            match_id: MatchId::new(),
            data: EventData::Position(PositionData {
                character: character(),
                elapsed_time: 10,
                num_alive_players: 90,
            }),
            ingested_at: Utc::now(),
        };
        assert_eq!(event.kind(), EventKind::LogPlayerPosition);
        let value = to_value(&event);
        assert_eq!(value["_T"], "LogPlayerPosition");
        assert_eq!(value["event_data"]["numAlivePlayers"], 90);
        assert_eq!(value["common"]["isGame"], 1.5);
    }

    #[test]
    fn character_only_keeps_its_kind() {
        let event = TelemetryEvent {
            timestamp: Utc::now(),
            common: Common { is_game: 2.0 },
            match_id: MatchId::new(),
            data: EventData::CharacterOnly {
                kind: EventKind::LogHeal,
                data: CharacterData {
                    character: character(),
                },
            },
            ingested_at: Utc::now(),
        };
        let value = to_value(&event);
        assert_eq!(value["_T"], "LogHeal");
        let Some(payload) = value["event_data"].as_object() else {
            panic!("event_data is not an object");
        };
        assert_eq!(payload.len(), 1);
        assert_eq!(payload["character"]["isInRedZone"], true);
    }

    #[test]
    fn pickup_item_is_flattened_with_stack_count() {
        let data = EventData::ItemPickup(ItemPickupData {
            character: character(),
            item: StackedItem {
                item: Item {
                    item_id: "Item_Weapon_AWM_C".to_string(),
                    category: "Weapon".to_string(),
                    sub_category: "Main".to_string(),
                },
                stack_count: 4,
            },
        });
        let Ok(value) = serde_json::to_value(&data) else {
            panic!("serialization failed");
        };
        assert_eq!(value["item"]["itemId"], "Item_Weapon_AWM_C");
        assert_eq!(value["item"]["stackCount"], 4);
    }

    #[test]
    fn event_has_exactly_the_pubg_fields() {
        let event = TelemetryEvent {
            timestamp: Utc::now(),
            common: Common { is_game: 0.5 },
            match_id: MatchId::new(),
            data: EventData::ItemDrop(ItemData {
                character: character(),
                item: Item::default(),
            }),
            ingested_at: Utc::now(),
        };
        let value = to_value(&event);
        let Some(obj) = value.as_object() else {
            panic!("event is not an object");
        };
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["_D", "_T", "common", "event_data", "ingested_at", "match_id"]
        );
    }

    #[test]
    fn kind_strings_match_serde_names() {
        for kind in [
            EventKind::LogPlayerKillV2,
            EventKind::LogVehicleRide,
            EventKind::LogItemDetach,
        ] {
            let Ok(json) = serde_json::to_string(&kind) else {
                panic!("serialization failed");
            };
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
