//! Plugin capability metadata returned by the init operation.

use serde::{Deserialize, Serialize};

use stratus_metrics::Statistic;

/// Capabilities this plugin advertises to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginMetadata {
    /// Statistic names the data operation accepts.
    pub supported_stat: Vec<String>,
    /// Resource-data keys the host must supply with each request.
    pub required_keys: Vec<String>,
    /// Providers this plugin can query.
    pub supported_providers: Vec<String>,
}

impl Default for PluginMetadata {
    fn default() -> Self {
        Self {
            supported_stat: Statistic::SUPPORTED
                .split(" | ")
                .map(str::to_string)
                .collect(),
            required_keys: vec!["data.google_cloud_monitoring".to_string()],
            supported_providers: vec!["google_cloud".to_string()],
        }
    }
}

/// Response of the init operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInitResponse {
    /// The advertised plugin capabilities.
    pub metadata: PluginMetadata,
}
