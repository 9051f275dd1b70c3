//! Time-window aggregation planning.
//!
//! Computes the bucket width for a query window and maps generic statistic
//! names onto the provider's per-series aligner codes. The cross-series
//! reducer is always none: each resource keeps its own series.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::TimeRange;

/// Per-series aligner codes understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aligner {
    /// Mean of the samples in each bucket.
    #[serde(rename = "ALIGN_MEAN")]
    Mean,
    /// Maximum sample in each bucket.
    #[serde(rename = "ALIGN_MAX")]
    Max,
    /// Minimum sample in each bucket.
    #[serde(rename = "ALIGN_MIN")]
    Min,
    /// Sum of the samples in each bucket.
    #[serde(rename = "ALIGN_SUM")]
    Sum,
}

impl Aligner {
    /// Returns the provider wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mean => "ALIGN_MEAN",
            Self::Max => "ALIGN_MAX",
            Self::Min => "ALIGN_MIN",
            Self::Sum => "ALIGN_SUM",
        }
    }
}

impl std::fmt::Display for Aligner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Cross-series reducer. Series are never merged across resources, so the
/// only value is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Reducer {
    /// Keep every matched series separate.
    #[default]
    #[serde(rename = "REDUCE_NONE")]
    None,
}

impl Reducer {
    /// Returns the provider wire code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        "REDUCE_NONE"
    }
}

impl std::fmt::Display for Reducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Generic statistic names accepted from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Statistic {
    /// Bucket mean; the default when the caller sends nothing.
    #[default]
    Mean,
    /// Bucket maximum.
    Max,
    /// Bucket minimum.
    Min,
    /// Bucket sum.
    Sum,
}

impl Statistic {
    /// The statistic names this engine accepts, for error messages.
    pub const SUPPORTED: &'static str = "MEAN | MAX | MIN | SUM";

    /// Parses a caller-supplied statistic name. Absent defaults to mean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedStat`] for any unrecognized name, listing
    /// the supported set.
    pub fn parse(stat: Option<&str>) -> Result<Self> {
        match stat {
            None => Ok(Self::Mean),
            Some("MEAN") => Ok(Self::Mean),
            Some("MAX") => Ok(Self::Max),
            Some("MIN") => Ok(Self::Min),
            Some("SUM") => Ok(Self::Sum),
            Some(other) => Err(Error::UnsupportedStat {
                stat: other.to_string(),
                supported: Self::SUPPORTED.to_string(),
            }),
        }
    }

    /// Maps this statistic onto the provider aligner.
    #[must_use]
    pub const fn aligner(self) -> Aligner {
        match self {
            Self::Mean => Aligner::Mean,
            Self::Max => Aligner::Max,
            Self::Min => Aligner::Min,
            Self::Sum => Aligner::Sum,
        }
    }
}

const HOUR: i64 = 3600;
const DAY: i64 = 24 * HOUR;

/// Returns the bucket width for a query window.
///
/// Tiered by elapsed seconds with inclusive upper bounds; the tiers cap the
/// point count near sixty regardless of window length.
#[must_use]
pub fn alignment_period(range: &TimeRange) -> Duration {
    let elapsed = range.elapsed_seconds();

    let seconds: u64 = if elapsed <= HOUR {
        60
    } else if elapsed <= 6 * HOUR {
        600
    } else if elapsed <= 12 * HOUR {
        1200
    } else if elapsed <= DAY {
        1800
    } else if elapsed <= 3 * DAY {
        3600
    } else if elapsed <= 7 * DAY {
        10_800
    } else if elapsed <= 14 * DAY {
        21_600
    } else {
        86_400
    };

    Duration::from_secs(seconds)
}

/// A planned windowed aggregation: bucket width, per-series aligner, and the
/// fixed cross-series reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationPlan {
    /// Bucket width for aligning raw points.
    pub alignment_period: Duration,
    /// Aggregation applied within each resource's series per bucket.
    pub per_series_aligner: Aligner,
    /// Aggregation across resources; always none.
    pub cross_series_reducer: Reducer,
}

impl AggregationPlan {
    /// Plans aggregation for a window with the given statistic.
    #[must_use]
    pub fn for_range(range: &TimeRange, stat: Statistic) -> Self {
        Self {
            alignment_period: alignment_period(range),
            per_series_aligner: stat.aligner(),
            cross_series_reducer: Reducer::None,
        }
    }

    /// Replaces the planned period with a caller-supplied override.
    #[must_use]
    pub const fn with_period(mut self, period: Duration) -> Self {
        self.alignment_period = period;
        self
    }

    /// Renders the period the way the provider expects, e.g. `3600s`.
    #[must_use]
    pub fn period_literal(&self) -> String {
        format!("{}s", self.alignment_period.as_secs())
    }
}
