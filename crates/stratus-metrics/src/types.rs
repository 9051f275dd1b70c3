//! Core types for the metric query engine.
//!
//! This module provides the fundamental types used throughout the
//! stratus-metrics crate:
//! - [`FilterCriterion`]: one resource/metric label match
//! - [`ResourceQuery`]: a typed, ordered set of criteria tagged with a
//!   logical resource id
//! - [`TimeRange`]: an absolute UTC query window
//! - [`MetricDescriptor`]: a retrievable metric with its bound query template
//! - [`NormalizedSeries`]: the canonical label/value output shape

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::units::UnitAxes;

/// The value side of a filter criterion.
///
/// A single value renders as an exact match; a set of values renders as a
/// `one_of(...)` disjunction in the provider grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Exact match against one value.
    One(String),
    /// Match against any of the listed values.
    AnyOf(Vec<String>),
}

impl FilterValue {
    /// Returns true when there is nothing to match against.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::One(value) => value.is_empty(),
            Self::AnyOf(values) => values.is_empty(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::AnyOf(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::AnyOf(values.into_iter().map(str::to_string).collect())
    }
}

/// One label match within a filter expression.
///
/// Criteria with an empty key or value are dropped silently by the filter
/// builder; they never cause an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    /// Label path in the provider grammar, e.g. `resource.labels.instance_id`.
    pub key: String,
    /// Value or value set to match.
    pub value: FilterValue,
}

impl FilterCriterion {
    /// Creates a new criterion.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A resource selection: optional type, ordered criteria, and the logical
/// resource id used to key output series back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceQuery {
    /// Caller-defined identifier tagging this resource's output values.
    pub resource_id: String,
    /// Monitored-resource or metric-namespace type, if the caller has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Ordered filter criteria for this resource.
    #[serde(default)]
    pub criteria: Vec<FilterCriterion>,
}

impl ResourceQuery {
    /// Creates a query for the given logical resource id.
    #[must_use]
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            resource_type: None,
            criteria: Vec::new(),
        }
    }

    /// Sets the resource type and returns self for chaining.
    #[must_use]
    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Appends a criterion and returns self for chaining.
    #[must_use]
    pub fn criterion(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.criteria.push(FilterCriterion::new(key, value));
        self
    }
}

/// Provider resource container that scopes catalog and series queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectScope(String);

impl ProjectScope {
    /// Creates a scope for the given project id.
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self(project_id.into())
    }

    /// Returns the project id.
    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.0
    }

    /// Renders the provider path, e.g. `projects/my-project`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("projects/{}", self.0)
    }
}

impl std::fmt::Display for ProjectScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// An absolute UTC query window. Invariant: `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Window start (inclusive).
    pub start: DateTime<Utc>,
    /// Window end (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a new time range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTimeRange`] unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the elapsed window length in whole seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

/// Kind of a provider metric. Only delta and gauge metrics are retrievable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    /// Change since the previous sample.
    Delta,
    /// Instantaneous measurement.
    Gauge,
    /// Any kind this engine does not chart (cumulative, unspecified, ...).
    #[default]
    #[serde(other)]
    Other,
}

impl MetricKind {
    /// Returns true for the kinds this engine can retrieve.
    #[must_use]
    pub const fn is_retrievable(self) -> bool {
        matches!(self, Self::Delta | Self::Gauge)
    }
}

/// Value type of a provider metric. Only numeric types are retrievable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// 64-bit floating point samples.
    Double,
    /// 64-bit integer samples.
    Int64,
    /// Any non-numeric type (bool, string, distribution, ...).
    #[default]
    #[serde(other)]
    Other,
}

impl ValueType {
    /// Returns true for the value types this engine can chart.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Double | Self::Int64)
    }
}

/// Query parameters bound at listing time so a later data request can reuse
/// them without re-deriving the filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemplate {
    /// Scope the descriptor was listed under.
    pub scope: ProjectScope,
    /// Logical resource id the listing was made for.
    pub resource_id: String,
    /// Fully qualified metric type to query.
    pub metric_type: String,
    /// The selector criteria active at listing time.
    #[serde(default)]
    pub criteria: Vec<FilterCriterion>,
}

/// A retrievable metric as presented to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Fully qualified metric type.
    pub key: String,
    /// Human-readable metric name.
    pub display_name: String,
    /// Display axes derived from the raw unit code.
    pub unit: UnitAxes,
    /// Metric kind; always retrievable here.
    pub kind: MetricKind,
    /// Value type; always numeric here.
    pub value_type: ValueType,
    /// Bound query parameters for fetching this metric later.
    pub query: QueryTemplate,
}

/// The canonical series output: one shared timestamp axis and one value
/// sequence per logical resource id.
///
/// Index `i` of every value sequence corresponds to `labels[i]`. Resources
/// that yielded no points are absent from `values`, never padded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    /// Sample timestamps, ascending.
    pub labels: Vec<DateTime<Utc>>,
    /// Value sequences keyed by logical resource id.
    pub values: BTreeMap<String, Vec<f64>>,
}

impl NormalizedSeries {
    /// Returns true when no resource produced any data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of resources with data in this series.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.values.len()
    }
}
