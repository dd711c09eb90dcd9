//! Command-line interface.
//!
//! Three subcommands share one binary:
//!
//! ```text
//! pubg-telemetry generate [--output-dir DIR] [--matches N] [--players N] [--events N] [--format json|jsonl]
//! pubg-telemetry upload   --bucket NAME [--prefix P] [--region R] [--matches N] [--players N] [--events N]
//! pubg-telemetry fetch    --api-key KEY --players NAME... [--platform steam|xbox|psn] [--max-matches N]
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ApiEnv, FetchConfig, GeneratorConfig, LocalOutputConfig, S3Config};
use crate::error::TelemetryError;
use crate::fetch::Shard;
use crate::generator::WeightProfile;
use crate::sink::OutputFormat;

/// Synthetic PUBG telemetry generator and PUBG API fetcher.
#[derive(Debug, Parser)]
#[command(name = "pubg-telemetry", version, about)]
pub struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate synthetic datasets into a local directory.
    Generate(GenerateArgs),
    /// Generate synthetic datasets and upload them to S3.
    Upload(UploadArgs),
    /// Fetch real match telemetry from the PUBG API.
    Fetch(FetchArgs),
}

/// Generator knobs shared by `generate` and `upload`.
#[derive(Debug, Clone, Args)]
pub struct GeneratorArgs {
    /// Event-kind weight profile.
    #[arg(long, value_enum, default_value_t = WeightProfile::Standard)]
    pub profile: WeightProfile,

    /// Seed for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments of `generate`.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Output directory.
    #[arg(long, default_value = "./sample_data")]
    pub output_dir: PathBuf,

    /// Number of matches.
    #[arg(long, default_value_t = 5)]
    pub matches: usize,

    /// Number of players.
    #[arg(long, default_value_t = 50)]
    pub players: usize,

    /// Events per match, excluding the match-start event.
    #[arg(long, default_value_t = 300)]
    pub events: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub generator: GeneratorArgs,
}

impl GenerateArgs {
    /// Splits the arguments into generator and output settings.
    #[must_use]
    pub fn into_configs(self) -> (GeneratorConfig, LocalOutputConfig) {
        let generator = GeneratorConfig {
            num_matches: self.matches,
            num_players: self.players,
            events_per_match: self.events,
            profile: self.generator.profile,
            seed: self.generator.seed,
        };
        let output = LocalOutputConfig {
            output_dir: self.output_dir,
            format: self.format,
        };
        (generator, output)
    }
}

/// Arguments of `upload`.
#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Target bucket.
    #[arg(long)]
    pub bucket: String,

    /// Key prefix.
    #[arg(long, default_value = "raw-data/")]
    pub prefix: String,

    /// AWS region.
    #[arg(long, default_value = "us-east-1")]
    pub region: String,

    /// Number of matches.
    #[arg(long, default_value_t = 10)]
    pub matches: usize,

    /// Number of players.
    #[arg(long, default_value_t = 100)]
    pub players: usize,

    /// Events per match, excluding the match-start event.
    #[arg(long, default_value_t = 500)]
    pub events: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
    pub format: OutputFormat,

    #[command(flatten)]
    #[allow(missing_docs)]
    pub generator: GeneratorArgs,
}

impl UploadArgs {
    /// Splits the arguments into generator and S3 settings.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidConfig`] for a blank bucket or
    /// region.
    pub fn into_configs(self) -> Result<(GeneratorConfig, S3Config), TelemetryError> {
        if self.bucket.trim().is_empty() {
            return Err(TelemetryError::InvalidConfig("bucket must not be empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(TelemetryError::InvalidConfig("region must not be empty".to_string()));
        }
        let generator = GeneratorConfig {
            num_matches: self.matches,
            num_players: self.players,
            events_per_match: self.events,
            profile: self.generator.profile,
            seed: self.generator.seed,
        };
        let s3 = S3Config {
            bucket: self.bucket,
            prefix: self.prefix,
            region: self.region,
            format: self.format,
        };
        Ok((generator, s3))
    }
}

/// Arguments of `fetch`.
#[derive(Clone, Args)]
pub struct FetchArgs {
    /// PUBG API key.
    #[arg(long, env = "PUBG_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Player names to fetch data for.
    #[arg(long, required = true, num_args = 1..)]
    pub players: Vec<String>,

    /// Platform shard.
    #[arg(long, value_enum, default_value_t = Shard::Steam)]
    pub platform: Shard,

    /// Output directory.
    #[arg(long, default_value = "./pubg_data")]
    pub output_dir: PathBuf,

    /// Most recent matches fetched per player.
    #[arg(long, default_value_t = 5)]
    pub max_matches: usize,
}

impl std::fmt::Debug for FetchArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchArgs")
            .field("api_key", &"<redacted>")
            .field("players", &self.players)
            .field("platform", &self.platform)
            .field("output_dir", &self.output_dir)
            .field("max_matches", &self.max_matches)
            .finish()
    }
}

impl FetchArgs {
    /// Combines the arguments with environment-backed connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::InvalidConfig`] for a blank API key or
    /// blank player names.
    pub fn into_config(self, env: ApiEnv) -> Result<FetchConfig, TelemetryError> {
        if self.api_key.trim().is_empty() {
            return Err(TelemetryError::InvalidConfig("api key must not be empty".to_string()));
        }
        let player_names: Vec<String> = self
            .players
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if player_names.is_empty() {
            return Err(TelemetryError::InvalidConfig("at least one player name is required".to_string()));
        }
        Ok(FetchConfig {
            api_key: self.api_key,
            player_names,
            shard: self.platform,
            output_dir: self.output_dir,
            max_matches: self.max_matches,
            base_url: env.base_url,
            min_request_interval: env.min_request_interval,
            http_timeout: env.http_timeout,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let Ok(cli) = Cli::try_parse_from(args) else {
            panic!("failed to parse {args:?}");
        };
        cli
    }

    #[test]
    fn generate_defaults() {
        let cli = parse(&["pubg-telemetry", "generate"]);
        let Command::Generate(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let (generator, output) = args.into_configs();
        assert_eq!(generator, GeneratorConfig::local());
        assert_eq!(output.output_dir, PathBuf::from("./sample_data"));
        assert_eq!(output.format, OutputFormat::Json);
    }

    #[test]
    fn upload_defaults() {
        let cli = parse(&["pubg-telemetry", "upload", "--bucket", "pubg-raw"]);
        let Command::Upload(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let Ok((generator, s3)) = args.into_configs() else {
            panic!("invalid config");
        };
        assert_eq!(generator, GeneratorConfig::upload());
        assert_eq!(s3.prefix, "raw-data/");
        assert_eq!(s3.region, "us-east-1");
        assert_eq!(s3.format, OutputFormat::Jsonl);
    }

    #[test]
    fn upload_requires_bucket() {
        assert!(Cli::try_parse_from(["pubg-telemetry", "upload"]).is_err());
    }

    #[test]
    fn fetch_takes_several_players() {
        let cli = parse(&[
            "pubg-telemetry",
            "fetch",
            "--api-key",
            "k",
            "--players",
            "shroud",
            "chocoTaco",
            "--platform",
            "xbox",
            "--log-json",
        ]);
        assert!(cli.log_json);
        let Command::Fetch(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let Ok(config) = args.into_config(ApiEnv::default()) else {
            panic!("invalid config");
        };
        assert_eq!(config.player_names, ["shroud", "chocoTaco"]);
        assert_eq!(config.shard, Shard::Xbox);
        assert_eq!(config.max_matches, 5);
        assert_eq!(config.output_dir, PathBuf::from("./pubg_data"));
    }

    #[test]
    fn fetch_rejects_blank_key() {
        let cli = parse(&["pubg-telemetry", "fetch", "--api-key", " ", "--players", "a"]);
        let Command::Fetch(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let result = args.into_config(ApiEnv::default());
        assert!(matches!(result, Err(TelemetryError::InvalidConfig(_))));
    }

    #[test]
    fn seed_and_profile_are_forwarded() {
        let cli = parse(&["pubg-telemetry", "generate", "--seed", "42", "--profile", "combat"]);
        let Command::Generate(args) = cli.command else {
            panic!("wrong subcommand");
        };
        let (generator, _) = args.into_configs();
        assert_eq!(generator.seed, Some(42));
        assert_eq!(generator.profile, WeightProfile::Combat);
    }
}
