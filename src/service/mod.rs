//! Service layer: run orchestration.
//!
//! [`generate_service`] drives the synthetic generator into a local
//! directory or an S3 bucket; [`fetch_service`] pulls real data from the
//! PUBG API. Both return a [`RunSummary`] on success and a run-level
//! [`crate::error::TelemetryError`] otherwise.

pub mod fetch_service;
pub mod generate_service;

pub use fetch_service::run_fetch;
pub use generate_service::{run_generate, run_upload};

/// Record counts of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Players written.
    pub players: usize,
    /// Matches written.
    pub matches: usize,
    /// Telemetry events written.
    pub events: usize,
}
