//! Dashboard configuration
//!
//! Every section falls back to its defaults, so a YAML file only needs the
//! keys it wants to change:
//!
//! ```yaml
//! generator:
//!   partner_count: 50
//!   social_days: 60
//! ranking:
//!   top_k: 5
//! ```

use crate::error::{DashboardError, DashboardResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Synthetic data generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of partners, root included
    pub partner_count: usize,
    /// Window for sales transaction dates, in days before the anchor
    pub sales_days: u32,
    /// Window for activity dates
    pub activity_days: u32,
    /// Number of daily social records per partner
    pub social_days: u32,
    /// "Today" for date synthesis; defaults to the local date
    pub anchor_date: Option<NaiveDate>,
    /// Fixed RNG seed; unseeded generation is non-deterministic
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            partner_count: 30,
            sales_days: 90,
            activity_days: 90,
            social_days: 90,
            anchor_date: None,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn anchor(&self) -> NaiveDate {
        self.anchor_date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Ranking and comparison limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Rows in the top/bottom ranking view
    pub top_k: usize,
    /// Rows in each leaderboard
    pub leaderboard_k: usize,
    /// Maximum partners in a multi-KPI comparison
    pub max_compare: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            leaderboard_k: 5,
            max_compare: 5,
        }
    }
}

/// Network graph sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub height: String,
    pub width: String,
    pub min_node_size: u32,
    pub max_node_size: u32,
    /// Revenue represented by one unit of node size
    pub revenue_per_size_unit: f64,
}

impl GraphConfig {
    pub fn validate(&self) -> DashboardResult<()> {
        if self.min_node_size > self.max_node_size {
            return Err(DashboardError::InvalidConfig(format!(
                "graph.min_node_size {} exceeds graph.max_node_size {}",
                self.min_node_size, self.max_node_size
            )));
        }
        if !(self.revenue_per_size_unit.is_finite() && self.revenue_per_size_unit > 0.0) {
            return Err(DashboardError::InvalidConfig(format!(
                "graph.revenue_per_size_unit must be positive, got {}",
                self.revenue_per_size_unit
            )));
        }
        Ok(())
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            height: "600px".to_string(),
            width: "100%".to_string(),
            min_node_size: 20,
            max_node_size: 50,
            revenue_per_size_unit: 2000.0,
        }
    }
}

/// CSV export destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("exports"),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub generator: GeneratorConfig,
    pub ranking: RankingConfig,
    pub graph: GraphConfig,
    pub export: ExportConfig,
}

impl DashboardConfig {
    pub fn from_yaml_str(yaml: &str) -> DashboardResult<Self> {
        let config: DashboardConfig = serde_yaml::from_str(yaml)?;
        config.graph.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> DashboardResult<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.generator.partner_count, 30);
        assert_eq!(config.generator.sales_days, 90);
        assert_eq!(config.ranking.top_k, 10);
        assert_eq!(config.ranking.max_compare, 5);
        assert_eq!(config.graph.min_node_size, 20);
        assert_eq!(config.graph.max_node_size, 50);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "generator:\n  partner_count: 12\n  anchor_date: 2024-06-30\nranking:\n  top_k: 3\n";
        let config = DashboardConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.generator.partner_count, 12);
        assert_eq!(config.generator.social_days, 90);
        assert_eq!(config.generator.anchor(), NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(config.ranking.top_k, 3);
        assert_eq!(config.ranking.leaderboard_k, 5);
        assert_eq!(config.graph, GraphConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = DashboardConfig::from_yaml_str("generator: [1, 2").unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn test_inverted_node_size_bounds_rejected() {
        let err = DashboardConfig::from_yaml_str("graph:\n  min_node_size: 60\n  max_node_size: 50\n").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
        assert!(err.to_string().contains("min_node_size"));

        let err = DashboardConfig::from_yaml_str("graph:\n  revenue_per_size_unit: 0\n").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("dashboard.yaml");
        std::fs::write(&path, "graph:\n  height: 800px\n").unwrap();
        let config = DashboardConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.graph.height, "800px");
    }
}
