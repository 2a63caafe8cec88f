//! Presentation layer
//!
//! Read-only over the aggregate tables:
//! - `network`: vis-network graph of the filtered hierarchy
//! - `charts`: chart specs for the dashboard tabs
//! - `report`: single-page HTML dashboard
//! - `format`: currency and count formatting
//!
//! HTML is produced from the tera templates under `templates/`.

pub mod charts;
pub mod format;
pub mod network;
pub mod report;
mod templates;

pub use charts::{ChartKind, ChartSpec, Series};
pub use format::{format_count, format_currency};
pub use network::{
    build_network, legend, network_page, render_network, render_network_in, GraphEdge, GraphNode,
    LegendEntry, NetworkGraph,
};
pub use report::{render_report, NO_DATA, TABS};
