//! Display-unit normalization and the percentage-unit family.
//!
//! The provider reports raw unit codes (`s`, `By`, `10^2.%`, ...); callers
//! get display axes instead. Units in the percentage family report values as
//! [0,1] fractions that the fetcher rescales by 100.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Display axes attached to a listed metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitAxes {
    /// X axis label; always the sample timestamp.
    pub x: String,
    /// Y axis display name derived from the raw unit code.
    pub y: String,
}

/// Maps a raw provider unit code to display axes.
///
/// Known codes get a display name; unknown codes pass through unchanged.
#[must_use]
pub fn normalize_unit(raw: &str) -> UnitAxes {
    let display = match raw {
        "s" => "Seconds",
        "By" => "Bytes",
        "10^2.%" => "Percentage",
        "1" => "Count",
        "s{idle}" => "Idle/s",
        "s{uptime}" => "Uptime/s",
        "s{CPU}" => "CPU/s",
        other => other,
    };

    UnitAxes {
        x: "Timestamp".to_string(),
        y: display.to_string(),
    }
}

static DEFAULT_PERCENT_UNITS: Lazy<PercentUnitSet> =
    Lazy::new(|| PercentUnitSet::new(["10^2.%"]));

/// Immutable set of unit codes whose raw values are [0,1] fractions
/// requiring a ×100 rescale for display.
///
/// Built once at startup from known provider unit metadata and passed to the
/// fetcher as a dependency; never mutated during request handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentUnitSet(BTreeSet<String>);

impl PercentUnitSet {
    /// Creates a set from the given unit codes.
    #[must_use]
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(codes.into_iter().map(Into::into).collect())
    }

    /// Returns true when the unit code belongs to the percentage family.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.0.contains(code)
    }

    /// The rescale factor for a series reported under `unit`.
    #[must_use]
    pub fn scale_for(&self, unit: Option<&str>) -> f64 {
        match unit {
            Some(code) if self.contains(code) => 100.0,
            _ => 1.0,
        }
    }

    /// Number of unit codes in the family.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the family is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PercentUnitSet {
    fn default() -> Self {
        DEFAULT_PERCENT_UNITS.clone()
    }
}
