//! Provider filter-expression builder.
//!
//! Turns ordered [`FilterCriterion`] lists into the provider's boolean
//! filter grammar. Building never fails: criteria that cannot render are
//! dropped silently and an empty input yields an empty expression.

use crate::types::{FilterCriterion, FilterValue};

/// How the type clause of a filter expression binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeClause {
    /// `metric.type = starts_with("<prefix>")` — match a metric namespace.
    MetricPrefix(String),
    /// `resource.type = "<type>"` — match the monitored-resource type.
    ResourceType(String),
}

impl TypeClause {
    /// Renders the clause in the provider grammar.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::MetricPrefix(prefix) => {
                format!("metric.type = starts_with(\"{prefix}\")")
            }
            Self::ResourceType(resource_type) => {
                format!("resource.type = \"{resource_type}\"")
            }
        }
    }
}

/// How criteria clauses are joined before binding to the type clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinPolicy {
    /// Criteria must all match.
    #[default]
    All,
    /// Criteria are alternative label matches; any may match.
    Any,
}

impl JoinPolicy {
    const fn separator(self) -> &'static str {
        match self {
            Self::All => " AND ",
            Self::Any => " OR ",
        }
    }
}

/// Builds a provider filter expression.
///
/// Criteria with an empty key or value are dropped silently. The type
/// clause, when given, is AND-ed against the joined criteria clauses; with
/// no renderable criteria the type clause stands alone, and with neither the
/// result is the empty string.
#[must_use]
pub fn build_filter(
    criteria: &[FilterCriterion],
    type_clause: Option<&TypeClause>,
    policy: JoinPolicy,
) -> String {
    let clauses: Vec<String> = criteria.iter().filter_map(render_criterion).collect();
    let joined = clauses.join(policy.separator());

    match type_clause {
        Some(clause) if joined.is_empty() => clause.render(),
        Some(clause) => format!("{} AND {joined}", clause.render()),
        None => joined,
    }
}

fn render_criterion(criterion: &FilterCriterion) -> Option<String> {
    if criterion.key.is_empty() || criterion.value.is_empty() {
        return None;
    }

    match &criterion.value {
        FilterValue::One(value) => Some(format!("{} = \"{value}\"", criterion.key)),
        FilterValue::AnyOf(values) => Some(format!(
            "{} = one_of(\"{}\")",
            criterion.key,
            values.join("\",\"")
        )),
    }
}
