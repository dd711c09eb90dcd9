//! HTTP client for the PUBG API and the telemetry CDN.
//!
//! API calls go through a [`RateGate`] and carry the bearer token. The
//! telemetry download is a plain GET against the CDN, without the token
//! and outside the rate gate. Gzip bodies are decoded by `reqwest`.
//!
//! Remote failures (see [`TelemetryError::is_recoverable`]) are logged and
//! surface as an empty result, so one bad player or match does not stop a
//! run. Anything else, such as an unusable base URL, is returned.

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::api::{Document, MatchResource, PlayerResource};
use super::rate_gate::RateGate;
use super::records::{ApiMatch, ApiPlayer, RawTelemetryEvent, flatten_telemetry};
use super::Shard;
use crate::config::FetchConfig;
use crate::error::TelemetryError;

/// Media type of PUBG API responses.
const JSON_API: &str = "application/vnd.api+json";

/// Rate-limited PUBG API client bound to one shard.
#[derive(Debug)]
pub struct PubgClient {
    api: reqwest::Client,
    cdn: reqwest::Client,
    base_url: String,
    shard: Shard,
    gate: RateGate,
}

impl PubgClient {
    /// Builds both HTTP clients from the fetch settings.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidConfig`] if the API key is not a
    /// valid header value, or [`TelemetryError::Network`] if the TLS
    /// backend cannot be initialised.
    pub fn new(config: &FetchConfig) -> Result<Self, TelemetryError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| TelemetryError::InvalidConfig("api key is not a valid header value".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API));

        let api = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;
        let cdn = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            api,
            cdn,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            shard: config.shard,
            gate: RateGate::new(config.min_request_interval),
        })
    }

    /// Resolves player names in one batch request. Names the API does not
    /// know are simply absent from the result.
    ///
    /// # Errors
    ///
    /// Only errors that are not [recoverable](TelemetryError::is_recoverable),
    /// such as a malformed base URL. Remote failures are logged and yield
    /// an empty list.
    pub async fn players_by_names(&mut self, names: &[String]) -> Result<Vec<ApiPlayer>, TelemetryError> {
        let path = format!("/shards/{}/players", self.shard.as_str());
        let query = [("filter[playerNames]", names.join(","))];
        let doc: Document<Vec<PlayerResource>> = match self.request_json(&path, &query).await {
            Ok(doc) => doc,
            Err(err) if err.is_recoverable() => {
                tracing::error!(error = %err, "error fetching players");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let ingested_at = chrono::Utc::now();
        let players: Vec<ApiPlayer> = doc
            .data
            .into_iter()
            .map(|p| ApiPlayer {
                account_id: p.id,
                player_name: p.attributes.name,
                platform: self.shard.as_str().to_string(),
                region: p.attributes.shard_id.unwrap_or_default(),
                ingested_at,
            })
            .collect();
        tracing::info!(requested = names.len(), found = players.len(), "resolved players");
        Ok(players)
    }

    /// Recent match ids of one account, newest first.
    ///
    /// # Errors
    ///
    /// See [`PubgClient::players_by_names`].
    pub async fn player_match_ids(&mut self, account_id: &str) -> Result<Vec<String>, TelemetryError> {
        let path = format!("/shards/{}/players/{account_id}", self.shard.as_str());
        match self.request_json::<Document<PlayerResource>>(&path, &[]).await {
            Ok(doc) => Ok(doc
                .data
                .relationships
                .matches
                .data
                .into_iter()
                .map(|r| r.id)
                .collect()),
            Err(err) if err.is_recoverable() => {
                tracing::error!(account_id, error = %err, "error fetching player matches");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    /// Match metadata, including the telemetry asset URL when listed.
    ///
    /// # Errors
    ///
    /// See [`PubgClient::players_by_names`]. A recoverable failure yields
    /// `Ok(None)`.
    pub async fn match_detail(&mut self, match_id: &str) -> Result<Option<ApiMatch>, TelemetryError> {
        let path = format!("/shards/{}/matches/{match_id}", self.shard.as_str());
        let doc: Document<MatchResource> = match self.request_json(&path, &[]).await {
            Ok(doc) => doc,
            Err(err) if err.is_recoverable() => {
                tracing::error!(match_id, error = %err, "error fetching match details");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let telemetry_url = doc.telemetry_url().map(str::to_string);
        let attrs = doc.data.attributes;
        Ok(Some(ApiMatch {
            match_id: doc.data.id,
            map_name: attrs.map_name,
            game_mode: attrs.game_mode,
            match_type: attrs.match_type,
            created_at: attrs.created_at,
            duration: attrs.duration,
            telemetry_url,
            ingested_at: chrono::Utc::now(),
        }))
    }

    /// Downloads and flattens a telemetry file.
    ///
    /// # Errors
    ///
    /// See [`PubgClient::players_by_names`]. A recoverable failure yields
    /// no events.
    pub async fn download_telemetry(
        &self,
        url: &str,
        match_id: &str,
    ) -> Result<Vec<RawTelemetryEvent>, TelemetryError> {
        match self.fetch_telemetry(url, match_id).await {
            Ok(events) => {
                tracing::info!(match_id, events = events.len(), "downloaded telemetry");
                Ok(events)
            }
            Err(err) if err.is_recoverable() => {
                tracing::error!(match_id, error = %err, "error downloading telemetry");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }

    async fn fetch_telemetry(
        &self,
        url: &str,
        match_id: &str,
    ) -> Result<Vec<RawTelemetryEvent>, TelemetryError> {
        let response = self
            .cdn
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = check_status(response, url)?;
        let bytes = response.bytes().await?;
        let raw: Vec<serde_json::Value> = serde_json::from_slice(&bytes)?;
        Ok(flatten_telemetry(raw, match_id))
    }

    async fn request_json<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TelemetryError> {
        let url = reqwest::Url::parse_with_params(&format!("{}{path}", self.base_url), query)
            .map_err(|e| TelemetryError::InvalidConfig(format!("bad api url: {e}")))?;

        self.gate.wait().await;
        tracing::debug!(%url, "api request");
        let response = self.api.get(url.clone()).send().await?;
        let response = check_status(response, url.as_str())?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Maps non-success statuses onto [`TelemetryError`].
fn check_status(response: reqwest::Response, url: &str) -> Result<reqwest::Response, TelemetryError> {
    match response.status() {
        s if s.is_success() => Ok(response),
        StatusCode::TOO_MANY_REQUESTS => Err(TelemetryError::RateLimited(url.to_string())),
        StatusCode::NOT_FOUND => Err(TelemetryError::NotFound(url.to_string())),
        s => Err(TelemetryError::HttpStatus {
            status: s.as_u16(),
            url: url.to_string(),
        }),
    }
}
