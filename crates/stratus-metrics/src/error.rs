//! Error types for the stratus-metrics crate.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur while translating queries or fetching series.
#[derive(Debug, Error)]
pub enum Error {
    /// Credentials or connection setup are unusable.
    ///
    /// Raised by the connection collaborator before any fetch is attempted;
    /// fatal for the whole request.
    #[error("configuration error: {reason}")]
    Configuration {
        /// Why the connection cannot be established.
        reason: String,
    },

    /// The requested statistic has no provider aligner mapping.
    #[error("unsupported stat '{stat}', supported: {supported}")]
    UnsupportedStat {
        /// The statistic name the caller sent.
        stat: String,
        /// The statistic names this engine accepts.
        supported: String,
    },

    /// A filter expression cannot be derived from the given resource shape.
    #[error("unsupported resource: {reason}")]
    UnsupportedResource {
        /// What was missing or malformed in the resource description.
        reason: String,
    },

    /// The time range is invalid; start must precede end.
    #[error("invalid time range: start={start}, end={end}")]
    InvalidTimeRange {
        /// Requested window start.
        start: DateTime<Utc>,
        /// Requested window end.
        end: DateTime<Utc>,
    },

    /// The remote provider rejected or failed a call.
    #[error("provider error: {reason}")]
    Provider {
        /// The provider-side failure description.
        reason: String,
    },
}

/// Result type for metric query operations.
pub type Result<T> = std::result::Result<T, Error>;
