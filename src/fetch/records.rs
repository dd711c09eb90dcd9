//! Records written by the fetcher.
//!
//! These mirror the synthetic datasets field for field, but keep the API's
//! own strings (shards, map codes, game modes) instead of the generator's
//! enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys lifted out of a raw event; everything else lands in `event_data`.
const ENVELOPE_KEYS: [&str; 5] = ["_D", "_T", "common", "match_id", "ingested_at"];

/// A player resolved through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPlayer {
    /// Account id.
    pub account_id: String,
    /// In-game name.
    pub player_name: String,
    /// Platform shard queried.
    pub platform: String,
    /// Shard reported by the API, empty if absent.
    pub region: String,
    /// When the record was produced.
    pub ingested_at: DateTime<Utc>,
}

/// Match metadata resolved through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMatch {
    /// Match id.
    pub match_id: String,
    /// Internal map name.
    pub map_name: String,
    /// Game mode string.
    pub game_mode: String,
    /// Match type string.
    pub match_type: String,
    /// ISO-8601 start time as reported.
    pub created_at: String,
    /// Length in seconds.
    pub duration: u64,
    /// Telemetry asset URL, if listed.
    pub telemetry_url: Option<String>,
    /// When the record was produced.
    pub ingested_at: DateTime<Utc>,
}

/// A downloaded telemetry event in the shared event layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTelemetryEvent {
    /// Event time as sent, `null` if missing.
    #[serde(rename = "_D")]
    pub timestamp: Value,
    /// Event type as sent, `null` if missing.
    #[serde(rename = "_T")]
    pub kind: Value,
    /// `common` block, `{}` if missing.
    pub common: Value,
    /// Match the telemetry was downloaded for.
    pub match_id: String,
    /// Every key of the raw event not lifted into the envelope.
    pub event_data: Map<String, Value>,
    /// When the record was produced.
    pub ingested_at: DateTime<Utc>,
}

impl RawTelemetryEvent {
    /// Splits one raw event object into envelope fields and `event_data`.
    #[must_use]
    pub fn from_raw(mut raw: Map<String, Value>, match_id: &str, ingested_at: DateTime<Utc>) -> Self {
        let timestamp = raw.remove("_D").unwrap_or(Value::Null);
        let kind = raw.remove("_T").unwrap_or(Value::Null);
        let common = raw
            .remove("common")
            .unwrap_or_else(|| Value::Object(Map::new()));
        for key in ENVELOPE_KEYS {
            raw.remove(key);
        }
        Self {
            timestamp,
            kind,
            common,
            match_id: match_id.to_string(),
            event_data: raw,
            ingested_at,
        }
    }
}

/// Flattens a downloaded telemetry array. Non-object entries are skipped.
#[must_use]
pub fn flatten_telemetry(raw: Vec<Value>, match_id: &str) -> Vec<RawTelemetryEvent> {
    let ingested_at = Utc::now();
    let total = raw.len();
    let events: Vec<RawTelemetryEvent> = raw
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(map) => Some(RawTelemetryEvent::from_raw(map, match_id, ingested_at)),
            _ => None,
        })
        .collect();
    if events.len() < total {
        tracing::warn!(match_id, skipped = total - events.len(), "skipped non-object telemetry entries");
    }
    events
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            panic!("not an object");
        };
        map
    }

    #[test]
    fn envelope_is_split_from_payload() {
        let raw = object(json!({
            "_D": "2024-05-01T10:00:01.123Z",
            "_T": "LogPlayerPosition",
            "common": {"isGame": 1.5},
            "character": {"name": "chocoTaco"},
            "elapsedTime": 12,
        }));
        let event = RawTelemetryEvent::from_raw(raw, "m-1", Utc::now());
        assert_eq!(event.kind, "LogPlayerPosition");
        assert_eq!(event.common["isGame"], 1.5);
        assert_eq!(event.match_id, "m-1");
        let mut keys: Vec<&str> = event.event_data.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["character", "elapsedTime"]);
    }

    #[test]
    fn missing_envelope_fields_get_defaults() {
        let raw = object(json!({"character": {}}));
        let event = RawTelemetryEvent::from_raw(raw, "m-2", Utc::now());
        assert!(event.timestamp.is_null());
        assert!(event.kind.is_null());
        assert_eq!(event.common, json!({}));
    }

    #[test]
    fn embedded_match_id_is_overridden() {
        let raw = object(json!({"_T": "LogMatchEnd", "match_id": "stale", "ingested_at": "x"}));
        let event = RawTelemetryEvent::from_raw(raw, "fresh", Utc::now());
        assert_eq!(event.match_id, "fresh");
        assert!(event.event_data.is_empty());
    }

    #[test]
    fn flatten_skips_non_objects() {
        let raw = vec![json!({"_T": "LogMatchStart"}), json!(42), json!({"_T": "LogMatchEnd"})];
        let events = flatten_telemetry(raw, "m-3");
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.match_id == "m-3"));
    }

    #[test]
    fn serialized_event_uses_pubg_keys() {
        let event = RawTelemetryEvent::from_raw(object(json!({"_T": "LogHeal"})), "m", Utc::now());
        let Ok(value) = serde_json::to_value(&event) else {
            panic!("serialization failed");
        };
        assert_eq!(value["_T"], "LogHeal");
        assert!(value.get("event_data").is_some());
    }
}
