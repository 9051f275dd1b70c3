//! Plugin service facade over the core engine.
//!
//! Wires the descriptor lister and series fetcher behind the two plugin
//! operations: listing the retrievable metrics for a resource and fetching
//! normalized windowed data for a metric.

use std::time::Duration;

use tracing::debug;

use stratus_metrics::{
    AggregationPlan, DescriptorLister, MetricCatalog, Result, SeriesFetcher, Statistic, TimeRange,
    TimeSeriesSource,
};

use crate::metadata::PluginInitResponse;
use crate::request::{ListMetricsRequest, MetricDataRequest};
use crate::response::{ListMetricsResponse, MetricDataResponse};

/// The plugin's metric operations over injected provider collaborators.
pub struct MetricService<C, S> {
    lister: DescriptorLister<C>,
    fetcher: SeriesFetcher<S>,
}

impl<C, S> std::fmt::Debug for MetricService<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricService").finish_non_exhaustive()
    }
}

impl<C: MetricCatalog, S: TimeSeriesSource> MetricService<C, S> {
    /// Creates a service from a configured lister and fetcher.
    #[must_use]
    pub fn new(lister: DescriptorLister<C>, fetcher: SeriesFetcher<S>) -> Self {
        Self { lister, fetcher }
    }

    /// Returns the plugin capability metadata.
    #[must_use]
    pub fn init(&self) -> PluginInitResponse {
        PluginInitResponse::default()
    }

    /// Lists the retrievable metrics for the requested resource.
    ///
    /// # Errors
    ///
    /// Fails on request validation or when the catalog collaborator fails.
    pub fn list(&self, request: &ListMetricsRequest) -> Result<ListMetricsResponse> {
        request.validate()?;
        let descriptors = self.lister.list(&request.resource)?;
        Ok(ListMetricsResponse::from_descriptors(descriptors))
    }

    /// Fetches normalized windowed data for the requested metric.
    ///
    /// Plans the bucket width from the request window unless the caller sent
    /// a period override, maps the statistic onto a provider aligner, and
    /// runs the per-resource fetch with partial-result semantics.
    ///
    /// # Errors
    ///
    /// Fails on request validation, an invalid time range, an unsupported
    /// statistic, or a configuration failure; per-resource provider errors
    /// are absorbed by the fetcher.
    pub fn get_data(&self, request: &MetricDataRequest) -> Result<MetricDataResponse> {
        request.validate()?;

        let range = TimeRange::new(request.start, request.end)?;
        let stat = Statistic::parse(request.stat.as_deref())?;

        let mut plan = AggregationPlan::for_range(&range, stat);
        if let Some(period) = request.period {
            plan = plan.with_period(Duration::from_secs(period));
        }

        debug!(
            metric = %request.metric,
            resources = request.resources.len(),
            period = %plan.period_literal(),
            aligner = %plan.per_series_aligner,
            "fetching metric data"
        );

        let series = self
            .fetcher
            .fetch(&request.resources, &request.metric, &range, &plan)?;

        Ok(MetricDataResponse::from(series))
    }
}
