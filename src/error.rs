//! Error types for generation, persistence and API fetching.
//!
//! [`TelemetryError`] is the central error type of the crate. Remote and
//! parse failures are usually caught at the call site, logged and turned
//! into an empty result; only run-level failures reach `main`, where
//! [`TelemetryError::exit_code`] decides the process status.

/// Crate-wide error enum.
///
/// # Categories
///
/// | Variants                                   | Origin                      |
/// |--------------------------------------------|-----------------------------|
/// | `Network`, `HttpStatus`, `RateLimited`, `NotFound` | PUBG API / telemetry CDN |
/// | `Parse`                                    | malformed JSON payloads      |
/// | `Io`, `ObjectStore`, `BucketUnavailable`   | sinks                        |
/// | `InvalidConfig`, `InvalidWeights`          | startup validation           |
/// | `NoPlayers`, `NoMatches`, `PersistFailed`  | run outcome                  |
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Connection, timeout or body-read failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status other than 404 and 429.
    #[error("http status {status} from {url}")]
    HttpStatus {
        /// Numeric status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The remote quota was exceeded (HTTP 429).
    #[error("rate limit exceeded for {0}")]
    RateLimited(String),

    /// The remote resource does not exist (HTTP 404).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// A payload could not be (de)serialized.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Local filesystem failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Object-store request failure.
    #[error("object store error: {0}")]
    ObjectStore(String),

    /// The target bucket neither exists nor could be created.
    #[error("bucket {0} is not available")]
    BucketUnavailable(String),

    /// A configuration value is missing or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An event weight table failed validation.
    #[error("invalid event weights: {0}")]
    InvalidWeights(String),

    /// No player could be resolved.
    #[error("no players found")]
    NoPlayers,

    /// No match could be resolved for any player.
    #[error("no matches found")]
    NoMatches,

    /// At least one dataset failed to persist.
    #[error("some datasets failed to persist")]
    PersistFailed,
}

impl TelemetryError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidConfig(_) | Self::InvalidWeights(_) => 2,
            _ => 1,
        }
    }

    /// Returns `true` if the error came from the remote side and the
    /// caller should skip the unit of work instead of aborting.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::HttpStatus { .. }
                | Self::RateLimited(_)
                | Self::NotFound(_)
                | Self::Parse(_)
        )
    }
}
