//! Outbound plugin response shapes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratus_metrics::{MetricDescriptor, NormalizedSeries, QueryTemplate, UnitAxes};

/// Chart rendering hint attached to listed metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Time-series line chart.
    #[default]
    Line,
}

/// One catalog entry in a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedMetric {
    /// Fully qualified metric type.
    pub key: String,
    /// Human-readable metric name.
    pub name: String,
    /// Display axes for charting.
    pub unit: UnitAxes,
    /// Chart rendering hint.
    #[serde(default)]
    pub chart_type: ChartType,
    /// Chart options; free-form, currently empty.
    #[serde(default)]
    pub chart_options: BTreeMap<String, serde_json::Value>,
    /// Bound query parameters for fetching this metric later.
    pub metric_query: QueryTemplate,
}

impl From<MetricDescriptor> for ListedMetric {
    fn from(descriptor: MetricDescriptor) -> Self {
        Self {
            key: descriptor.key,
            name: descriptor.display_name,
            unit: descriptor.unit,
            chart_type: ChartType::Line,
            chart_options: BTreeMap::new(),
            metric_query: descriptor.query,
        }
    }
}

/// Response of the list operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListMetricsResponse {
    /// The retrievable metrics for the requested resource.
    pub metrics: Vec<ListedMetric>,
}

impl ListMetricsResponse {
    /// Wraps listed descriptors into the response shape.
    #[must_use]
    pub fn from_descriptors(descriptors: Vec<MetricDescriptor>) -> Self {
        Self {
            metrics: descriptors.into_iter().map(ListedMetric::from).collect(),
        }
    }
}

/// Response of the data operation: the canonical label/value series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricDataResponse {
    /// Sample timestamps, ascending, shared by every value sequence.
    pub labels: Vec<DateTime<Utc>>,
    /// Value sequences keyed by logical resource id.
    pub values: BTreeMap<String, Vec<f64>>,
}

impl From<NormalizedSeries> for MetricDataResponse {
    fn from(series: NormalizedSeries) -> Self {
        Self {
            labels: series.labels,
            values: series.values,
        }
    }
}
