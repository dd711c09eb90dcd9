//! Synthetic generation runs.

use super::RunSummary;
use crate::config::{GeneratorConfig, LocalOutputConfig, S3Config};
use crate::domain::Catalog;
use crate::error::TelemetryError;
use crate::generator::TelemetryGenerator;
use crate::sink::{DatasetSink, LocalSink, OutputFormat, S3Sink, persist_all};

/// Builds a generator over the standard catalog with the configured
/// weight profile and seed.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidWeights`] if the profile's table
/// fails validation.
pub fn build_generator(config: &GeneratorConfig) -> Result<TelemetryGenerator, TelemetryError> {
    let weights = config.profile.weights()?;
    Ok(TelemetryGenerator::with_seed(Catalog::standard(), weights, config.seed))
}

/// Generates all three datasets and writes them to `sink`.
///
/// # Errors
///
/// Returns [`TelemetryError::PersistFailed`] if any dataset could not be
/// written. The other datasets are still attempted. Weight-table errors
/// from [`build_generator`] are returned before anything is written.
pub async fn generate_into<S>(
    sink: &S,
    config: &GeneratorConfig,
    format: OutputFormat,
) -> Result<RunSummary, TelemetryError>
where
    S: DatasetSink + Sync,
{
    let mut generator = build_generator(config)?;
    let data = generator.generate_all(config.num_players, config.num_matches, config.events_per_match);

    let summary = RunSummary {
        players: data.players.len(),
        matches: data.matches.len(),
        events: data.events.len(),
    };
    if persist_all(sink, &data.players, &data.matches, &data.events, format).await {
        Ok(summary)
    } else {
        Err(TelemetryError::PersistFailed)
    }
}

/// Generates datasets into a local directory.
///
/// # Errors
///
/// See [`generate_into`].
pub async fn run_generate(
    config: &GeneratorConfig,
    output: &LocalOutputConfig,
) -> Result<RunSummary, TelemetryError> {
    tracing::info!(
        output_dir = %output.output_dir.display(),
        matches = config.num_matches,
        players = config.num_players,
        events_per_match = config.events_per_match,
        "generating sample data"
    );
    let sink = LocalSink::new(&output.output_dir);
    generate_into(&sink, config, output.format).await
}

/// Generates datasets and uploads them to S3. The bucket is ensured
/// before anything is generated.
///
/// # Errors
///
/// Returns [`TelemetryError::BucketUnavailable`] if the bucket neither
/// exists nor can be created, otherwise see [`generate_into`].
pub async fn run_upload(config: &GeneratorConfig, s3: &S3Config) -> Result<RunSummary, TelemetryError> {
    tracing::info!(bucket = %s3.bucket, prefix = %s3.prefix, region = %s3.region, "uploading sample data");
    let sink = S3Sink::connect(s3).await;
    sink.ensure_bucket().await?;
    generate_into(&sink, config, s3.format).await
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::generator::WeightProfile;

    fn tiny(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            num_matches: 2,
            num_players: 4,
            events_per_match: 7,
            profile: WeightProfile::Combat,
            seed: Some(seed),
        }
    }

    #[tokio::test]
    async fn run_generate_reports_counts() {
        let Ok(tmp) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let output = LocalOutputConfig {
            output_dir: tmp.path().join("out"),
            format: OutputFormat::Jsonl,
        };
        let Ok(summary) = run_generate(&tiny(3), &output).await else {
            panic!("generation failed");
        };
        assert_eq!(
            summary,
            RunSummary {
                players: 4,
                matches: 2,
                events: 16
            }
        );
        assert!(output.output_dir.join("telemetry_events.jsonl").is_file());
    }

    #[tokio::test]
    async fn unwritable_directory_fails_the_run() {
        let Ok(tmp) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let blocker = tmp.path().join("file");
        if std::fs::write(&blocker, b"x").is_err() {
            panic!("setup failed");
        }
        let output = LocalOutputConfig {
            output_dir: blocker,
            format: OutputFormat::Json,
        };
        let result = run_generate(&tiny(1), &output).await;
        assert!(matches!(result, Err(TelemetryError::PersistFailed)));
    }

    #[test]
    fn seeded_generators_agree() {
        let (Ok(mut a), Ok(mut b)) = (build_generator(&tiny(9)), build_generator(&tiny(9))) else {
            panic!("generator setup failed");
        };
        let left = a.generate_players(3);
        let right = b.generate_players(3);
        let ids = |p: &[crate::domain::Player]| p.iter().map(|x| x.account_id).collect::<Vec<_>>();
        assert_eq!(ids(&left), ids(&right));
    }
}
