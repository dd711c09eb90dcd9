//! # pubg-telemetry
//!
//! Synthetic PUBG telemetry generator, S3 uploader and PUBG API telemetry
//! fetcher.
//!
//! The crate produces three datasets per run (players, matches and
//! telemetry events) either from a seeded random generator or from the
//! public PUBG API, and writes them as JSON or JSON Lines to a local
//! directory or an S3 bucket.
//!
//! ## Architecture
//!
//! ```text
//! CLI (cli/, main.rs)
//!     │
//!     ├── generate_service ── TelemetryGenerator (generator/)
//!     │                          └── Catalog, EventWeights (domain/, generator/)
//!     ├── fetch_service ───── PubgClient + RateGate (fetch/)
//!     │
//!     └── DatasetSink (sink/)
//!           ├── LocalSink
//!           └── S3Sink
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod generator;
pub mod service;
pub mod sink;
