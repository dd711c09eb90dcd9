//! PUBG API fetch run: players, then matches, then telemetry.

use std::collections::HashSet;

use super::RunSummary;
use crate::config::FetchConfig;
use crate::error::TelemetryError;
use crate::fetch::{ApiMatch, PubgClient, RawTelemetryEvent};
use crate::sink::{LocalSink, OutputFormat, persist_all};

/// Keeps the first `max_per_player` ids of each list and removes
/// duplicates, preserving first-seen order.
#[must_use]
pub fn collect_match_ids<I>(per_player: I, max_per_player: usize) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for ids in per_player {
        for id in ids.into_iter().take(max_per_player) {
            if seen.insert(id.clone()) {
                ordered.push(id);
            }
        }
    }
    ordered
}

/// Fetches players, their recent matches and the matches' telemetry, then
/// writes `players.json`, `matches.json` and `telemetry_events.json`.
///
/// Matches whose details cannot be fetched are skipped; matches without a
/// telemetry asset are kept without events.
///
/// # Errors
///
/// - [`TelemetryError::NoPlayers`] if no name resolves.
/// - [`TelemetryError::NoMatches`] if no player has a match.
/// - [`TelemetryError::PersistFailed`] if any file cannot be written.
/// - Client construction errors from [`PubgClient::new`] and any
///   non-recoverable client error.
pub async fn run_fetch(config: &FetchConfig) -> Result<RunSummary, TelemetryError> {
    tracing::info!(
        platform = %config.shard,
        players = ?config.player_names,
        max_matches = config.max_matches,
        output_dir = %config.output_dir.display(),
        "fetching PUBG telemetry"
    );
    let mut client = PubgClient::new(config)?;

    let players = client.players_by_names(&config.player_names).await?;
    if players.is_empty() {
        tracing::error!("no players found, check player names and platform");
        return Err(TelemetryError::NoPlayers);
    }

    let mut per_player = Vec::with_capacity(players.len());
    for player in &players {
        let ids = client.player_match_ids(&player.account_id).await?;
        if ids.is_empty() {
            tracing::warn!(player = %player.player_name, "no matches found for player");
        } else {
            tracing::info!(player = %player.player_name, matches = ids.len(), "found matches");
        }
        per_player.push(ids);
    }
    let match_ids = collect_match_ids(per_player, config.max_matches);
    tracing::info!(unique = match_ids.len(), "total unique matches to fetch");
    if match_ids.is_empty() {
        return Err(TelemetryError::NoMatches);
    }

    let mut matches: Vec<ApiMatch> = Vec::with_capacity(match_ids.len());
    let mut events: Vec<RawTelemetryEvent> = Vec::new();
    for (i, match_id) in match_ids.iter().enumerate() {
        tracing::info!(match_id = %match_id, n = i + 1, of = match_ids.len(), "processing match");
        let Some(detail) = client.match_detail(match_id).await? else {
            tracing::warn!(match_id = %match_id, "skipping match, could not fetch data");
            continue;
        };
        match detail.telemetry_url.as_deref() {
            Some(url) => events.extend(client.download_telemetry(url, match_id).await?),
            None => tracing::warn!(match_id = %match_id, "no telemetry url for match"),
        }
        matches.push(detail);
    }

    let sink = LocalSink::new(&config.output_dir);
    if !persist_all(&sink, &players, &matches, &events, OutputFormat::Json).await {
        return Err(TelemetryError::PersistFailed);
    }

    Ok(RunSummary {
        players: players.len(),
        matches: matches.len(),
        events: events.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn truncates_each_player_before_merging() {
        let merged = collect_match_ids(vec![ids(&["a", "b", "c"]), ids(&["d", "e", "f"])], 2);
        assert_eq!(merged, ids(&["a", "b", "d", "e"]));
    }

    #[test]
    fn shared_matches_appear_once_in_first_seen_order() {
        let merged = collect_match_ids(vec![ids(&["m2", "m1"]), ids(&["m1", "m3"])], 5);
        assert_eq!(merged, ids(&["m2", "m1", "m3"]));
    }

    #[test]
    fn zero_limit_yields_nothing() {
        assert!(collect_match_ids(vec![ids(&["a"])], 0).is_empty());
    }
}
