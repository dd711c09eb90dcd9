//! Dataset sinks: local directory and object store.
//!
//! Records are encoded once ([`encode`]) and handed to a [`DatasetSink`]
//! as bytes. [`persist_all`] writes players, matches and events
//! independently: a failure is logged and reported through the returned
//! flag, and the remaining datasets are still attempted.

pub mod local;
pub mod s3;

use std::future::Future;

use serde::Serialize;

use crate::error::TelemetryError;

pub use local::LocalSink;
pub use s3::S3Sink;

/// Serialization format of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// A single JSON array, indented with two spaces.
    #[default]
    Json,
    /// One compact JSON object per line.
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Jsonl => "jsonl",
        }
    }

    /// MIME type used for object-store uploads.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Jsonl => "application/x-ndjson",
        }
    }
}

/// The three datasets every run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// `players.{ext}`.
    Players,
    /// `matches.{ext}`.
    Matches,
    /// `telemetry_events.{ext}`.
    TelemetryEvents,
}

impl Dataset {
    /// File name stem.
    #[must_use]
    pub const fn stem(&self) -> &'static str {
        match self {
            Self::Players => "players",
            Self::Matches => "matches",
            Self::TelemetryEvents => "telemetry_events",
        }
    }

    /// File name including the format extension.
    #[must_use]
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!("{}.{}", self.stem(), format.extension())
    }
}

/// Encodes `records` in `format`.
///
/// JSONL output is newline-terminated, so it holds exactly one line per
/// record and is empty for an empty slice.
///
/// # Errors
///
/// Returns [`TelemetryError::Parse`] if a record fails to serialize.
pub fn encode<T: Serialize>(records: &[T], format: OutputFormat) -> Result<Vec<u8>, TelemetryError> {
    match format {
        OutputFormat::Json => {
            let mut body = serde_json::to_vec_pretty(records)?;
            body.push(b'\n');
            Ok(body)
        }
        OutputFormat::Jsonl => {
            let mut body = Vec::new();
            for record in records {
                serde_json::to_writer(&mut body, record)?;
                body.push(b'\n');
            }
            Ok(body)
        }
    }
}

/// Destination for encoded datasets.
pub trait DatasetSink {
    /// Human-readable location of `file_name` in this sink, for logs.
    fn location(&self, file_name: &str) -> String;

    /// Stores one encoded dataset under `file_name`.
    ///
    /// # Errors
    ///
    /// Returns [`TelemetryError::Io`] or [`TelemetryError::ObjectStore`]
    /// when the write fails.
    fn put(
        &self,
        file_name: &str,
        format: OutputFormat,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<(), TelemetryError>> + Send;
}

/// Encodes and stores one dataset. Returns `false` on failure after
/// logging it.
pub async fn write_dataset<S, T>(
    sink: &S,
    dataset: Dataset,
    records: &[T],
    format: OutputFormat,
) -> bool
where
    S: DatasetSink + Sync,
    T: Serialize + Sync,
{
    let file_name = dataset.file_name(format);
    let location = sink.location(&file_name);

    let body = match encode(records, format) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(dataset = dataset.stem(), error = %e, "failed to encode dataset");
            return false;
        }
    };

    match sink.put(&file_name, format, body).await {
        Ok(()) => {
            tracing::info!(records = records.len(), %location, "saved dataset");
            true
        }
        Err(e) => {
            tracing::error!(%location, error = %e, "failed to save dataset");
            false
        }
    }
}

/// Writes all three datasets and returns `true` only if every write
/// succeeded. Every write is attempted.
pub async fn persist_all<S, P, M, E>(
    sink: &S,
    players: &[P],
    matches: &[M],
    events: &[E],
    format: OutputFormat,
) -> bool
where
    S: DatasetSink + Sync,
    P: Serialize + Sync,
    M: Serialize + Sync,
    E: Serialize + Sync,
{
    let players_ok = write_dataset(sink, Dataset::Players, players, format).await;
    let matches_ok = write_dataset(sink, Dataset::Matches, matches, format).await;
    let events_ok = write_dataset(sink, Dataset::TelemetryEvents, events, format).await;
    players_ok && matches_ok && events_ok
}
