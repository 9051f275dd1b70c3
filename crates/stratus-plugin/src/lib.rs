//! Monitoring plugin service facade over the stratus metric query engine.
//!
//! `stratus-plugin` is the thin glue between a plugin host and
//! [`stratus_metrics`]: inbound request shapes with validation, the service
//! facade wiring the aggregation planner into the descriptor lister and
//! series fetcher, and the capability metadata advertised at init.
//!
//! Credential loading and transport setup stay with the host; the service is
//! generic over the two provider collaborator traits so deployments and
//! tests inject their own.

pub mod metadata;
pub mod request;
pub mod response;
pub mod service;

// Re-export main types at crate root
pub use metadata::{PluginInitResponse, PluginMetadata};
pub use request::{ListMetricsRequest, MetricDataRequest};
pub use response::{ChartType, ListMetricsResponse, ListedMetric, MetricDataResponse};
pub use service::MetricService;
