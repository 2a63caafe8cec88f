//! Partnernet
//!
//! Analytics for a three-tier partner network (distributors, agents and
//! ambassadors): synthetic hierarchy and fact generation, filtering and KPI
//! aggregation, rankings, and an HTML dashboard with an interactive network
//! graph.
//!
//! # Architecture
//!
//! - `generator`: partner tree plus sales, activity and daily social facts
//! - `session`: the current dataset snapshot, replaced wholesale
//! - `analytics`: pure filter and aggregate functions
//! - `render`: network graph, chart specs and report
//! - `pipeline`: one call from dataset and controls to every panel
//! - `io`: partner upload and CSV export
//!
//! ## Example Usage
//!
//! ```rust
//! use partnernet::{build_view, DashboardConfig, FilterSet, Level, Session, ViewOptions};
//!
//! let mut config = DashboardConfig::default();
//! config.generator.seed = Some(42);
//!
//! let session = Session::create(config);
//! let filters = FilterSet::default().with_levels([Level::Agent, Level::Ambassador]);
//! let view = build_view(session.dataset(), &filters, &ViewOptions::default());
//!
//! assert!(view.summaries.kpi.iter().all(|r| r.level != Level::Distributor));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod error;
pub mod generator;
pub mod hierarchy;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod session;

// Re-export main types for convenience
pub use model::{
    ActivityRecord, ActivityType, Level, Partner, PartnerId, SalesRecord, SocialRecord, Status,
};

pub use analytics::{
    apply_filters, kpi_summary, level_summary, rank, summarize, time_series, FilterSet, KpiMetric,
    KpiRow, SortOrder,
};

pub use config::DashboardConfig;
pub use dataset::{Dataset, Origin};
pub use error::{DashboardError, DashboardResult};
pub use hierarchy::{HierarchyError, HierarchyView};
pub use pipeline::{build_view, DashboardView, Panel, ViewOptions};
pub use session::Session;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
