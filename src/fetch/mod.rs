//! PUBG API fetcher.
//!
//! - [`api`]: JSON:API response shapes
//! - [`client`]: rate-limited API client and telemetry download
//! - [`rate_gate`]: minimum spacing between API requests
//! - [`records`]: records written to disk

pub mod api;
pub mod client;
pub mod rate_gate;
pub mod records;

pub use client::PubgClient;
pub use rate_gate::RateGate;
pub use records::{ApiMatch, ApiPlayer, RawTelemetryEvent};

/// Platform shard of the PUBG API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Shard {
    /// PC (Steam).
    #[default]
    Steam,
    /// Xbox.
    Xbox,
    /// PlayStation.
    Psn,
}

impl Shard {
    /// Path segment used in API URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steam => "steam",
            Self::Xbox => "xbox",
            Self::Psn => "psn",
        }
    }
}

impl std::fmt::Display for Shard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
