//! Inbound plugin request shapes and validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratus_metrics::{Error, ResourceQuery, Result};

/// Request for the metric catalog of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListMetricsRequest {
    /// The resource whose retrievable metrics should be listed.
    pub resource: ResourceQuery,
}

impl ListMetricsRequest {
    /// Checks the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedResource`] when no filter could be
    /// derived from the request.
    pub fn validate(&self) -> Result<()> {
        if self.resource.resource_id.is_empty() {
            return Err(Error::UnsupportedResource {
                reason: "resource id is empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Request for windowed metric data over a batch of resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDataRequest {
    /// Resources to query; each keeps its own output series.
    pub resources: Vec<ResourceQuery>,
    /// Fully qualified metric type to fetch.
    pub metric: String,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
    /// Caller override for the bucket width, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<u64>,
    /// Statistic name; mean when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<String>,
}

impl MetricDataRequest {
    /// Checks the required fields. The time window itself is validated when
    /// the service builds its [`stratus_metrics::TimeRange`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedResource`] when the metric key or the
    /// resource batch is empty.
    pub fn validate(&self) -> Result<()> {
        if self.metric.is_empty() {
            return Err(Error::UnsupportedResource {
                reason: "metric key is empty".to_string(),
            });
        }
        if self.resources.is_empty() {
            return Err(Error::UnsupportedResource {
                reason: "no resources to query".to_string(),
            });
        }
        Ok(())
    }
}
