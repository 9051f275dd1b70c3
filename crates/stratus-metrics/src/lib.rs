//! Metric-query translation and time-series normalization for cloud
//! monitoring providers.
//!
//! `stratus-metrics` lets a caller request telemetry without speaking the
//! provider's native query grammar. It turns generic resource/metric filter
//! descriptions into the provider's boolean filter expressions, plans a
//! windowed aggregation (bucket width and statistic) from a caller time
//! range, and normalizes the provider's raw per-resource point streams into
//! one canonical label/value series.
//!
//! # Features
//!
//! - **Filter builder**: ordered criteria + optional type clause → provider
//!   filter expression, with configurable join policy
//! - **Aggregation planner**: tiered bucket widths capping the point count
//!   near sixty, generic statistic names mapped to provider aligners
//! - **Descriptor lister**: catalog of retrievable metrics with bound query
//!   templates and a pluggable label-shape predicate
//! - **Series fetcher**: per-resource windowed queries with partial-result
//!   semantics and percentage-unit rescaling
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use stratus_metrics::{
//!     AggregationPlan, FilterCriterion, JoinPolicy, Statistic, TimeRange, TypeClause,
//!     build_filter,
//! };
//!
//! let criteria = vec![FilterCriterion::new("resource.labels.instance_id", "1843122")];
//! let clause = TypeClause::ResourceType("gce_instance".to_string());
//! let filter = build_filter(&criteria, Some(&clause), JoinPolicy::All);
//! assert!(filter.contains("resource.type = \"gce_instance\""));
//!
//! let range = TimeRange::new(
//!     Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2026, 3, 1, 6, 0, 0).unwrap(),
//! )
//! .unwrap();
//! let plan = AggregationPlan::for_range(&range, Statistic::parse(Some("MAX")).unwrap());
//! assert_eq!(plan.period_literal(), "600s");
//! ```

pub mod catalog;
pub mod error;
pub mod filter;
pub mod plan;
pub mod provider;
pub mod series;
pub mod types;
pub mod units;

// Re-export main types at crate root
pub use catalog::{AnyShape, DescriptorLister, LabelShape, NamedInstanceShape, TypeClauseKind};
pub use error::{Error, Result};
pub use filter::{JoinPolicy, TypeClause, build_filter};
pub use plan::{AggregationPlan, Aligner, Reducer, Statistic, alignment_period};
pub use provider::{MetricCatalog, TimeSeriesSource, WindowedQuery};
pub use series::SeriesFetcher;
pub use types::{
    FilterCriterion, FilterValue, MetricDescriptor, MetricKind, NormalizedSeries, ProjectScope,
    QueryTemplate, ResourceQuery, TimeRange, ValueType,
};
pub use units::{PercentUnitSet, UnitAxes, normalize_unit};
