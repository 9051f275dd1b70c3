//! Metric descriptor listing and selection.
//!
//! Fetches the provider's metric catalog for a resource selector, keeps only
//! the numeric, retrievable descriptors, and binds each one to a query
//! template a later data request can reuse.

use tracing::debug;

use crate::error::Result;
use crate::filter::{JoinPolicy, TypeClause, build_filter};
use crate::provider::{MetricCatalog, RawLabelDescriptor};
use crate::types::{MetricDescriptor, ProjectScope, QueryTemplate, ResourceQuery};
use crate::units::normalize_unit;

/// Which clause a selector's type renders as in the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeClauseKind {
    /// `metric.type = starts_with(..)` — the type names a metric namespace.
    #[default]
    MetricPrefix,
    /// `resource.type = ".."` — the type names a monitored resource.
    ResourceType,
}

impl TypeClauseKind {
    fn clause_for(self, type_name: &str) -> TypeClause {
        match self {
            Self::MetricPrefix => TypeClause::MetricPrefix(type_name.to_string()),
            Self::ResourceType => TypeClause::ResourceType(type_name.to_string()),
        }
    }
}

/// Pluggable predicate over a descriptor's label shape.
///
/// Deployments that only chart a fixed label layout reject everything else;
/// the default [`AnyShape`] accepts all descriptors.
pub trait LabelShape: Send + Sync {
    /// Returns true when a descriptor with these labels should be listed.
    fn accepts(&self, labels: &[RawLabelDescriptor], metric_key: &str) -> bool;
}

/// Accepts every label shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyShape;

impl LabelShape for AnyShape {
    fn accepts(&self, _labels: &[RawLabelDescriptor], _metric_key: &str) -> bool {
        true
    }
}

/// Accepts descriptors labeled per named instance, rejecting guest metrics.
///
/// A descriptor passes when its labels carry both `instance_name` and
/// `storage_type`, or exactly one `instance_name` label, and the metric key
/// does not contain `guest`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamedInstanceShape;

impl LabelShape for NamedInstanceShape {
    fn accepts(&self, labels: &[RawLabelDescriptor], metric_key: &str) -> bool {
        let has_key = |key: &str| labels.iter().any(|label| label.key == key);

        let shape_matches = (has_key("instance_name") && has_key("storage_type"))
            || (labels.len() == 1 && labels[0].key == "instance_name");

        shape_matches && !metric_key.contains("guest")
    }
}

/// Lists and selects retrievable metric descriptors for a resource.
pub struct DescriptorLister<C> {
    catalog: C,
    scope: ProjectScope,
    join: JoinPolicy,
    clause: TypeClauseKind,
    shape: Box<dyn LabelShape>,
}

impl<C> std::fmt::Debug for DescriptorLister<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorLister")
            .field("scope", &self.scope)
            .field("join", &self.join)
            .field("clause", &self.clause)
            .finish_non_exhaustive()
    }
}

impl<C: MetricCatalog> DescriptorLister<C> {
    /// Creates a lister over the given catalog collaborator.
    #[must_use]
    pub fn new(catalog: C, scope: ProjectScope) -> Self {
        Self {
            catalog,
            scope,
            join: JoinPolicy::All,
            clause: TypeClauseKind::default(),
            shape: Box::new(AnyShape),
        }
    }

    /// Sets the criteria join policy and returns self for chaining.
    #[must_use]
    pub fn with_join(mut self, join: JoinPolicy) -> Self {
        self.join = join;
        self
    }

    /// Sets how the selector's type clause binds and returns self.
    #[must_use]
    pub fn with_clause(mut self, clause: TypeClauseKind) -> Self {
        self.clause = clause;
        self
    }

    /// Replaces the label-shape predicate and returns self.
    #[must_use]
    pub fn with_shape(mut self, shape: impl LabelShape + 'static) -> Self {
        self.shape = Box::new(shape);
        self
    }

    /// Lists the retrievable metrics for the selected resource.
    ///
    /// Keeps descriptors whose kind and value type are numeric and whose
    /// label shape the configured predicate accepts. Each kept descriptor
    /// carries a [`QueryTemplate`] binding the selector for later reuse.
    ///
    /// # Errors
    ///
    /// Propagates the catalog collaborator's failure; no retry.
    pub fn list(&self, selector: &ResourceQuery) -> Result<Vec<MetricDescriptor>> {
        let type_clause = selector
            .resource_type
            .as_deref()
            .map(|type_name| self.clause.clause_for(type_name));
        let filter = build_filter(&selector.criteria, type_clause.as_ref(), self.join);

        debug!(
            scope = %self.scope,
            resource_id = %selector.resource_id,
            filter = %filter,
            "listing metric descriptors"
        );

        let raw = self.catalog.list_descriptors(&self.scope, &filter)?;
        let total = raw.len();

        let descriptors: Vec<MetricDescriptor> = raw
            .into_iter()
            .filter(|descriptor| {
                descriptor.metric_kind.is_retrievable()
                    && descriptor.value_type.is_numeric()
                    && self
                        .shape
                        .accepts(&descriptor.labels, &descriptor.metric_type)
            })
            .map(|descriptor| MetricDescriptor {
                key: descriptor.metric_type.clone(),
                display_name: descriptor.display_name,
                unit: normalize_unit(&descriptor.unit),
                kind: descriptor.metric_kind,
                value_type: descriptor.value_type,
                query: QueryTemplate {
                    scope: self.scope.clone(),
                    resource_id: selector.resource_id.clone(),
                    metric_type: descriptor.metric_type,
                    criteria: selector.criteria.clone(),
                },
            })
            .collect();

        debug!(total, kept = descriptors.len(), "selected retrievable descriptors");

        Ok(descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::provider::RawMetricDescriptor;
    use crate::types::{MetricKind, ValueType};
    use std::sync::Mutex;

    struct FakeCatalog {
        descriptors: Vec<RawMetricDescriptor>,
        seen_filters: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        fn returning(descriptors: Vec<RawMetricDescriptor>) -> Self {
            Self {
                descriptors,
                seen_filters: Mutex::new(Vec::new()),
            }
        }
    }

    impl MetricCatalog for FakeCatalog {
        fn list_descriptors(
            &self,
            _scope: &ProjectScope,
            filter: &str,
        ) -> Result<Vec<RawMetricDescriptor>> {
            self.seen_filters
                .lock()
                .unwrap()
                .push(filter.to_string());
            Ok(self.descriptors.clone())
        }
    }

    struct FailingCatalog;

    impl MetricCatalog for FailingCatalog {
        fn list_descriptors(
            &self,
            _scope: &ProjectScope,
            _filter: &str,
        ) -> Result<Vec<RawMetricDescriptor>> {
            Err(Error::Provider {
                reason: "unavailable".to_string(),
            })
        }
    }

    fn descriptor(
        metric_type: &str,
        kind: MetricKind,
        value_type: ValueType,
    ) -> RawMetricDescriptor {
        RawMetricDescriptor {
            metric_type: metric_type.to_string(),
            display_name: format!("{metric_type} display"),
            unit: "10^2.%".to_string(),
            metric_kind: kind,
            value_type,
            labels: vec![RawLabelDescriptor::new("instance_name")],
        }
    }

    fn selector() -> ResourceQuery {
        ResourceQuery::new("server-001")
            .with_type("cloudsql.googleapis.com")
            .criterion("resource.labels.database_id", "db-1")
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn keeps_only_numeric_retrievable_descriptors() {
            let catalog = FakeCatalog::returning(vec![
                descriptor("a/cpu", MetricKind::Gauge, ValueType::Double),
                descriptor("a/requests", MetricKind::Delta, ValueType::Int64),
                descriptor("a/state", MetricKind::Gauge, ValueType::Other),
                descriptor("a/total", MetricKind::Other, ValueType::Double),
            ]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"));

            let metrics = lister.list(&selector()).unwrap();
            let keys: Vec<&str> = metrics.iter().map(|m| m.key.as_str()).collect();
            assert_eq!(keys, vec!["a/cpu", "a/requests"]);
        }

        #[test]
        fn descriptors_carry_bound_query_template() {
            let catalog = FakeCatalog::returning(vec![descriptor(
                "a/cpu",
                MetricKind::Gauge,
                ValueType::Double,
            )]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"));

            let metrics = lister.list(&selector()).unwrap();
            let query = &metrics[0].query;
            assert_eq!(query.scope, ProjectScope::new("p"));
            assert_eq!(query.resource_id, "server-001");
            assert_eq!(query.metric_type, "a/cpu");
            assert_eq!(query.criteria.len(), 1);
        }

        #[test]
        fn descriptors_carry_normalized_units() {
            let catalog = FakeCatalog::returning(vec![descriptor(
                "a/cpu",
                MetricKind::Gauge,
                ValueType::Double,
            )]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"));

            let metrics = lister.list(&selector()).unwrap();
            assert_eq!(metrics[0].unit.y, "Percentage");
        }

        #[test]
        fn provider_failure_propagates() {
            let lister = DescriptorLister::new(FailingCatalog, ProjectScope::new("p"));
            match lister.list(&selector()) {
                Err(Error::Provider { .. }) => {}
                other => panic!("expected Provider error, got {other:?}"),
            }
        }
    }

    mod filter_construction_tests {
        use super::*;

        #[test]
        fn default_clause_is_metric_prefix() {
            let catalog = FakeCatalog::returning(vec![]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"));
            lister.list(&selector()).unwrap();

            let filters = lister.catalog.seen_filters.lock().unwrap();
            assert_eq!(
                filters[0],
                "metric.type = starts_with(\"cloudsql.googleapis.com\") \
                 AND resource.labels.database_id = \"db-1\""
            );
        }

        #[test]
        fn resource_type_clause_when_configured() {
            let catalog = FakeCatalog::returning(vec![]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"))
                .with_clause(TypeClauseKind::ResourceType);
            lister
                .list(&ResourceQuery::new("server-001").with_type("gce_instance"))
                .unwrap();

            let filters = lister.catalog.seen_filters.lock().unwrap();
            assert_eq!(filters[0], "resource.type = \"gce_instance\"");
        }

        #[test]
        fn selector_without_type_sends_criteria_only() {
            let catalog = FakeCatalog::returning(vec![]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"));
            lister
                .list(&ResourceQuery::new("server-001").criterion("k", "v"))
                .unwrap();

            let filters = lister.catalog.seen_filters.lock().unwrap();
            assert_eq!(filters[0], "k = \"v\"");
        }
    }

    mod label_shape_tests {
        use super::*;

        fn labels(keys: &[&str]) -> Vec<RawLabelDescriptor> {
            keys.iter().map(|key| RawLabelDescriptor::new(*key)).collect()
        }

        #[test]
        fn any_shape_accepts_everything() {
            assert!(AnyShape.accepts(&[], "anything"));
            assert!(AnyShape.accepts(&labels(&["x", "y"]), "guest/metric"));
        }

        #[test]
        fn named_instance_accepts_paired_labels() {
            let shape = NamedInstanceShape;
            assert!(shape.accepts(&labels(&["instance_name", "storage_type"]), "a/cpu"));
        }

        #[test]
        fn named_instance_accepts_single_instance_label() {
            let shape = NamedInstanceShape;
            assert!(shape.accepts(&labels(&["instance_name"]), "a/cpu"));
        }

        #[test]
        fn named_instance_rejects_guest_metrics() {
            let shape = NamedInstanceShape;
            assert!(!shape.accepts(
                &labels(&["instance_name", "storage_type"]),
                "a/guest/cpu"
            ));
        }

        #[test]
        fn named_instance_rejects_other_shapes() {
            let shape = NamedInstanceShape;
            assert!(!shape.accepts(&labels(&["zone"]), "a/cpu"));
            assert!(!shape.accepts(&labels(&["instance_name", "zone"]), "a/cpu"));
            assert!(!shape.accepts(&[], "a/cpu"));
        }

        #[test]
        fn shape_predicate_filters_listing() {
            let mut with_zone = descriptor("a/zonal", MetricKind::Gauge, ValueType::Double);
            with_zone.labels = labels(&["zone"]);

            let catalog = FakeCatalog::returning(vec![
                descriptor("a/cpu", MetricKind::Gauge, ValueType::Double),
                with_zone,
            ]);
            let lister = DescriptorLister::new(catalog, ProjectScope::new("p"))
                .with_shape(NamedInstanceShape);

            let metrics = lister.list(&selector()).unwrap();
            assert_eq!(metrics.len(), 1);
            assert_eq!(metrics[0].key, "a/cpu");
        }
    }
}
