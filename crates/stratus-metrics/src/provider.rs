//! Collaborator interfaces at the provider boundary.
//!
//! The transport that actually speaks to the monitoring provider lives
//! outside this crate. These traits and raw wire records define exactly what
//! that collaborator must accept and return; test doubles implement the same
//! traits. Record fields follow the provider's camelCase JSON shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plan::{AggregationPlan, Aligner, Reducer};
use crate::types::{MetricKind, ProjectScope, TimeRange, ValueType};

/// One label descriptor attached to a raw metric descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLabelDescriptor {
    /// Label key, e.g. `instance_name`.
    pub key: String,
    /// Optional provider description of the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawLabelDescriptor {
    /// Creates a label descriptor with just a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: None,
        }
    }
}

/// Raw metric descriptor record as returned by the provider catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMetricDescriptor {
    /// Fully qualified metric type,
    /// e.g. `compute.googleapis.com/instance/cpu/utilization`.
    #[serde(rename = "type")]
    pub metric_type: String,
    /// Human-readable metric name.
    pub display_name: String,
    /// Raw unit code, e.g. `10^2.%`.
    pub unit: String,
    /// Metric kind; unknown kinds parse as [`MetricKind::Other`].
    pub metric_kind: MetricKind,
    /// Value type; unknown types parse as [`ValueType::Other`].
    pub value_type: ValueType,
    /// Labels the provider attaches to each series of this metric.
    pub labels: Vec<RawLabelDescriptor>,
}

/// Raw point interval on the wire; timestamps are RFC 3339-style strings
/// with or without fractional seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInterval {
    /// Bucket start instant.
    pub start_time: String,
    /// Bucket end instant.
    pub end_time: String,
}

/// Raw point value on the wire. Exactly one of the fields is set for the
/// numeric metrics this engine retrieves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawValue {
    /// Floating-point sample, when the metric's value type is double.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_value: Option<f64>,
    /// Integer sample, when the metric's value type is int64.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int64_value: Option<i64>,
}

impl RawValue {
    /// Extracts the numeric value: the double field is preferred, then the
    /// integer field, then zero.
    #[must_use]
    pub fn numeric(&self) -> f64 {
        self.double_value
            .or_else(|| self.int64_value.map(|v| v as f64))
            .unwrap_or(0.0)
    }
}

/// One aligned point of a raw time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPoint {
    /// The aligned bucket interval.
    pub interval: RawInterval,
    /// The aggregated bucket value.
    pub value: RawValue,
}

/// One raw series stream from the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTimeSeries {
    /// Aligned points; ordering is not guaranteed by the provider.
    pub points: Vec<RawPoint>,
}

/// Full response of one windowed time-series call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTimeSeriesResponse {
    /// Matched series streams.
    pub time_series: Vec<RawTimeSeries>,
    /// Unit code shared by the returned streams, when the provider sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Requested detail level for series responses; always full detail here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueryView {
    /// Points and metadata.
    #[default]
    #[serde(rename = "FULL")]
    Full,
}

/// Fully rendered windowed query handed to the time-series collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowedQuery {
    /// Filter expression selecting the metric and resource records.
    pub filter: String,
    /// Bucket width literal, e.g. `3600s`.
    pub alignment_period: String,
    /// Aggregation within each series per bucket.
    pub per_series_aligner: Aligner,
    /// Aggregation across series; always none.
    pub cross_series_reducer: Reducer,
    /// Window start.
    pub interval_start: DateTime<Utc>,
    /// Window end.
    pub interval_end: DateTime<Utc>,
    /// Response detail level.
    pub view: QueryView,
}

impl WindowedQuery {
    /// Renders a query from a filter, a plan, and a window.
    #[must_use]
    pub fn new(filter: impl Into<String>, plan: &AggregationPlan, range: &TimeRange) -> Self {
        Self {
            filter: filter.into(),
            alignment_period: plan.period_literal(),
            per_series_aligner: plan.per_series_aligner,
            cross_series_reducer: plan.cross_series_reducer,
            interval_start: range.start,
            interval_end: range.end,
            view: QueryView::Full,
        }
    }
}

/// Read side of the provider's metric-descriptor catalog.
pub trait MetricCatalog: Send + Sync {
    /// Lists raw metric descriptors matching a filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Provider`] when the remote call fails and
    /// [`crate::Error::Configuration`] when the connection is unusable.
    fn list_descriptors(
        &self,
        scope: &ProjectScope,
        filter: &str,
    ) -> Result<Vec<RawMetricDescriptor>>;
}

/// Windowed time-series read path of the provider.
pub trait TimeSeriesSource: Send + Sync {
    /// Executes one windowed query and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Provider`] when the remote call fails and
    /// [`crate::Error::Configuration`] when the connection is unusable.
    fn list_time_series(
        &self,
        scope: &ProjectScope,
        query: &WindowedQuery,
    ) -> Result<RawTimeSeriesResponse>;
}
