//! pubg-telemetry entry point.
//!
//! Parses the command line, installs the tracing subscriber and runs the
//! selected subcommand. Run-level failures become a non-zero exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pubg_telemetry::cli::{Cli, Command};
use pubg_telemetry::config::ApiEnv;
use pubg_telemetry::error::TelemetryError;
use pubg_telemetry::service::{self, RunSummary};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Optional .env, so PUBG_API_KEY and friends can live there
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    match run(cli.command).await {
        Ok(summary) => {
            tracing::info!(
                players = summary.players,
                matches = summary.matches,
                events = summary.events,
                "run complete"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            Ok(ExitCode::from(err.exit_code()))
        }
    }
}

async fn run(command: Command) -> Result<RunSummary, TelemetryError> {
    match command {
        Command::Generate(args) => {
            let (generator, output) = args.into_configs();
            service::run_generate(&generator, &output).await
        }
        Command::Upload(args) => {
            let (generator, s3) = args.into_configs()?;
            service::run_upload(&generator, &s3).await
        }
        Command::Fetch(args) => {
            let config = args.into_config(ApiEnv::from_env())?;
            service::run_fetch(&config).await
        }
    }
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
