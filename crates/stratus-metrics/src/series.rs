//! Windowed time-series fetching and normalization.
//!
//! Executes one windowed query per resource and assembles the canonical
//! label/value output. Each resource's fetch is independent: a failing
//! resource is logged and skipped so the batch returns a partial result.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::filter::{JoinPolicy, TypeClause, build_filter};
use crate::plan::AggregationPlan;
use crate::provider::{RawInterval, RawPoint, TimeSeriesSource, WindowedQuery};
use crate::types::{NormalizedSeries, ProjectScope, ResourceQuery, TimeRange};
use crate::units::PercentUnitSet;

const FRACTIONAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const WHOLE_SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, FRACTIONAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, WHOLE_SECOND_FORMAT))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Canonical timestamp for a raw bucket interval.
///
/// The midpoint of the interval when both ends parse; the end instant alone
/// when only it does; `None` when nothing parses. Parsing tries the
/// fractional-second format first, then whole seconds.
#[must_use]
pub fn interval_timestamp(interval: &RawInterval) -> Option<DateTime<Utc>> {
    match (
        parse_instant(&interval.start_time),
        parse_instant(&interval.end_time),
    ) {
        (Some(start), Some(end)) => Some(start + (end - start) / 2),
        (_, end) => end,
    }
}

/// Fetches windowed time series per resource and normalizes the points.
pub struct SeriesFetcher<S> {
    source: S,
    scope: ProjectScope,
    percent_units: PercentUnitSet,
}

impl<S> std::fmt::Debug for SeriesFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesFetcher")
            .field("scope", &self.scope)
            .field("percent_units", &self.percent_units)
            .finish_non_exhaustive()
    }
}

impl<S: TimeSeriesSource> SeriesFetcher<S> {
    /// Creates a fetcher over the given time-series collaborator.
    #[must_use]
    pub fn new(source: S, scope: ProjectScope) -> Self {
        Self {
            source,
            scope,
            percent_units: PercentUnitSet::default(),
        }
    }

    /// Replaces the percentage-unit family set and returns self.
    #[must_use]
    pub fn with_percent_units(mut self, percent_units: PercentUnitSet) -> Self {
        self.percent_units = percent_units;
        self
    }

    /// Fetches one metric across a batch of resources and assembles the
    /// canonical series.
    ///
    /// Per resource, the metric-type filter is AND-ed with the resource's
    /// criteria (alternative label matches, OR-joined) and one windowed
    /// query is issued. Timestamps are taken from the first resource that
    /// yields points; shared alignment makes them valid for the batch.
    /// Resources yielding no points are absent from the value map.
    ///
    /// # Errors
    ///
    /// Per-resource provider failures are absorbed: the resource is logged
    /// and skipped, and the batch continues. Only
    /// [`Error::Configuration`] aborts the whole request.
    pub fn fetch(
        &self,
        resources: &[ResourceQuery],
        metric_type: &str,
        range: &TimeRange,
        plan: &AggregationPlan,
    ) -> Result<NormalizedSeries> {
        let mut series = NormalizedSeries::default();

        for resource in resources {
            let type_clause = TypeClause::MetricPrefix(metric_type.to_string());
            let filter = build_filter(&resource.criteria, Some(&type_clause), JoinPolicy::Any);
            let query = WindowedQuery::new(filter, plan, range);

            debug!(
                resource_id = %resource.resource_id,
                filter = %query.filter,
                period = %query.alignment_period,
                "fetching windowed series"
            );

            let response = match self.source.list_time_series(&self.scope, &query) {
                Ok(response) => response,
                Err(err @ Error::Configuration { .. }) => return Err(err),
                Err(err) => {
                    warn!(
                        resource_id = %resource.resource_id,
                        error = %err,
                        "resource fetch failed, skipping"
                    );
                    continue;
                }
            };

            let scale = self.percent_units.scale_for(response.unit.as_deref());
            let points = response
                .time_series
                .first()
                .map(|stream| stream.points.as_slice())
                .unwrap_or_default();

            let (timestamps, values) = normalize_points(points, scale);
            if values.is_empty() {
                debug!(resource_id = %resource.resource_id, "no points in window");
                continue;
            }

            if series.labels.is_empty() {
                series.labels = timestamps;
            }
            series
                .values
                .insert(resource.resource_id.clone(), values);
        }

        Ok(series)
    }
}

/// Sorts raw points by interval start and derives canonical timestamps and
/// scaled numeric values in lockstep.
fn normalize_points(points: &[RawPoint], scale: f64) -> (Vec<DateTime<Utc>>, Vec<f64>) {
    let mut ordered: Vec<&RawPoint> = points.iter().collect();
    ordered.sort_by(|a, b| a.interval.start_time.cmp(&b.interval.start_time));

    let mut timestamps = Vec::with_capacity(ordered.len());
    let mut values = Vec::with_capacity(ordered.len());

    for point in ordered {
        let Some(timestamp) = interval_timestamp(&point.interval) else {
            debug!(
                start = %point.interval.start_time,
                end = %point.interval.end_time,
                "unparseable interval, dropping point"
            );
            continue;
        };

        timestamps.push(timestamp);
        values.push(point.value.numeric() * scale);
    }

    (timestamps, values)
}
