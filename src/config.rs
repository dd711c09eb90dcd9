//! Run configuration.
//!
//! Command-line flags carry the per-run choices (counts, formats,
//! destinations). Connection settings that rarely change come from
//! environment variables, optionally loaded from a `.env` file via
//! `dotenvy`:
//!
//! | Variable                        | Default                | Meaning                          |
//! |---------------------------------|------------------------|----------------------------------|
//! | `PUBG_API_BASE_URL`             | `https://api.pubg.com` | PUBG API root                    |
//! | `PUBG_MIN_REQUEST_INTERVAL_SECS`| `6`                    | spacing between API requests     |
//! | `PUBG_HTTP_TIMEOUT_SECS`        | `30`                   | per-request timeout              |

use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::Shard;
use crate::generator::WeightProfile;
use crate::sink::OutputFormat;

/// Default PUBG API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.pubg.com";

/// Default spacing between API requests. The public API key tier allows
/// ten requests per minute.
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_secs(6);

/// Dataset sizes and randomness for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of matches.
    pub num_matches: usize,
    /// Number of players.
    pub num_players: usize,
    /// Events per match, excluding the match-start event.
    pub events_per_match: usize,
    /// Event-kind weight table.
    pub profile: WeightProfile,
    /// Fixed RNG seed, if any.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Defaults for local generation: 5 matches, 50 players, 300 events.
    #[must_use]
    pub const fn local() -> Self {
        Self {
            num_matches: 5,
            num_players: 50,
            events_per_match: 300,
            profile: WeightProfile::Standard,
            seed: None,
        }
    }

    /// Defaults for object-store uploads: 10 matches, 100 players, 500
    /// events.
    #[must_use]
    pub const fn upload() -> Self {
        Self {
            num_matches: 10,
            num_players: 100,
            events_per_match: 500,
            profile: WeightProfile::Standard,
            seed: None,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::local()
    }
}

/// Where and how to write local output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOutputConfig {
    /// Target directory, created if missing.
    pub output_dir: PathBuf,
    /// Serialization format.
    pub format: OutputFormat,
}

/// Object-store destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// Key prefix, usually ending in `/`.
    pub prefix: String,
    /// AWS region.
    pub region: String,
    /// Serialization format.
    pub format: OutputFormat,
}

/// Settings for the PUBG API fetcher.
#[derive(Clone)]
pub struct FetchConfig {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Player names to resolve.
    pub player_names: Vec<String>,
    /// Platform shard to query.
    pub shard: Shard,
    /// Directory the three JSON files are written to.
    pub output_dir: PathBuf,
    /// Most recent matches kept per player.
    pub max_matches: usize,
    /// API root, overridable for testing.
    pub base_url: String,
    /// Minimum spacing between API requests.
    pub min_request_interval: Duration,
    /// Per-request timeout.
    pub http_timeout: Duration,
}

impl std::fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchConfig")
            .field("api_key", &"<redacted>")
            .field("player_names", &self.player_names)
            .field("shard", &self.shard)
            .field("output_dir", &self.output_dir)
            .field("max_matches", &self.max_matches)
            .field("base_url", &self.base_url)
            .field("min_request_interval", &self.min_request_interval)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

/// Connection settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEnv {
    /// `PUBG_API_BASE_URL`.
    pub base_url: String,
    /// `PUBG_MIN_REQUEST_INTERVAL_SECS`.
    pub min_request_interval: Duration,
    /// `PUBG_HTTP_TIMEOUT_SECS`.
    pub http_timeout: Duration,
}

impl ApiEnv {
    /// Loads connection settings from environment variables.
    ///
    /// Falls back to defaults when a variable is missing or malformed.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("PUBG_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let min_request_interval = Duration::from_secs(parse_env(
            "PUBG_MIN_REQUEST_INTERVAL_SECS",
            DEFAULT_MIN_REQUEST_INTERVAL.as_secs(),
        ));
        let http_timeout = Duration::from_secs(parse_env("PUBG_HTTP_TIMEOUT_SECS", 30));

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            min_request_interval,
            http_timeout,
        }
    }
}

impl Default for ApiEnv {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
            http_timeout: Duration::from_secs(30),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_of_defaults() {
        let local = GeneratorConfig::local();
        assert_eq!((local.num_matches, local.num_players, local.events_per_match), (5, 50, 300));
        let upload = GeneratorConfig::upload();
        assert_eq!((upload.num_matches, upload.num_players, upload.events_per_match), (10, 100, 500));
        assert_eq!(GeneratorConfig::default(), local);
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        let value: u64 = parse_env("PUBG_TELEMETRY_TEST_SURELY_UNSET", 17);
        assert_eq!(value, 17);
    }

    #[test]
    fn api_env_default_matches_constants() {
        let env = ApiEnv::default();
        assert_eq!(env.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(env.min_request_interval, Duration::from_secs(6));
    }

    #[test]
    fn fetch_config_debug_hides_key() {
        let config = FetchConfig {
            api_key: "secret-key".to_string(),
            player_names: vec!["shroud".to_string()],
            shard: Shard::Steam,
            output_dir: PathBuf::from("./pubg_data"),
            max_matches: 5,
            base_url: DEFAULT_API_BASE_URL.to_string(),
            min_request_interval: DEFAULT_MIN_REQUEST_INTERVAL,
            http_timeout: Duration::from_secs(30),
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("shroud"));
    }
}
