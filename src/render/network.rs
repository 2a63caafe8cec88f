//! Interactive partner network graph
//!
//! Nodes are the filtered partners, edges are parent -> child links whose
//! both ends survived the filters. Output is a vis-network page using the
//! forceAtlas2Based solver.

use super::format::{format_currency, script_json};
use super::templates::{self, NETWORK_PAGE, VIS_NETWORK_JS};
use crate::config::GraphConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::hierarchy::HierarchyView;
use crate::model::{Level, Partner, PartnerId};
use serde::Serialize;
use std::collections::HashSet;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tera::Context;
use tracing::debug;

pub const SELECTED_BORDER_COLOR: &str = "#FF0000";
pub const DEFAULT_BORDER_COLOR: &str = "#000000";
pub const SELECTED_BORDER_WIDTH: u32 = 3;
pub const DEFAULT_BORDER_WIDTH: u32 = 1;

const STAGING_PREFIX: &str = "partner-network-";

const NETWORK_OPTIONS: &str = r#"{
  "physics": {
    "forceAtlas2Based": {
      "gravitationalConstant": -50,
      "springLength": 100,
      "avoidOverlap": 1
    },
    "maxVelocity": 50,
    "minVelocity": 0.75,
    "solver": "forceAtlas2Based"
  },
  "interaction": {
    "hover": true,
    "tooltipDelay": 200
  },
  "edges": {
    "arrows": "to"
  }
}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: PartnerId,
    pub label: String,
    /// Plain-text tooltip, one attribute per line
    pub title: String,
    pub color: NodeColor,
    pub size: u32,
    pub border_width: u32,
    pub border_width_selected: u32,
}

/// Fill by level, border by selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodeColor {
    pub background: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub from: PartnerId,
    pub to: PartnerId,
}

/// Nodes and edges ready for the vis-network renderer
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl NetworkGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: PartnerId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Node size: revenue in size units, clamped to the configured bounds.
/// Inverted bounds resolve to `max_node_size`.
pub fn node_size(total_revenue: f64, config: &GraphConfig) -> u32 {
    let units = (total_revenue / config.revenue_per_size_unit).floor();
    units.max(config.min_node_size as f64).min(config.max_node_size as f64) as u32
}

fn tooltip(p: &Partner) -> String {
    [
        p.name.clone(),
        format!("Level: {}", p.level),
        format!("Status: {}", p.status),
        format!("Join Date: {}", p.join_date),
        format!("Revenue: {}", format_currency(p.total_revenue)),
        format!("Advocacy Score: {}/100", p.advocacy_score),
        format!("Sentiment: {:.2}", p.sentiment),
        format!("Posts: {}", p.posts),
        format!("Shares: {}", p.shares),
        format!("Engagement: {}/100", p.engagement),
    ]
    .join("\n")
}

/// Build the graph for a filtered partner list. `hierarchy` may cover more
/// partners than `partners`; only edges inside the list are kept.
pub fn build_network(
    partners: &[&Partner],
    hierarchy: &HierarchyView,
    selected: Option<PartnerId>,
    config: &GraphConfig,
) -> NetworkGraph {
    let nodes = partners
        .iter()
        .map(|p| {
            let is_selected = selected == Some(p.partner_id);
            GraphNode {
                id: p.partner_id,
                label: p.name.clone(),
                title: tooltip(p),
                color: NodeColor {
                    background: p.level.color(),
                    border: if is_selected { SELECTED_BORDER_COLOR } else { DEFAULT_BORDER_COLOR },
                },
                size: node_size(p.total_revenue, config),
                border_width: if is_selected { SELECTED_BORDER_WIDTH } else { DEFAULT_BORDER_WIDTH },
                border_width_selected: SELECTED_BORDER_WIDTH + 1,
            }
        })
        .collect();

    let present: HashSet<PartnerId> = partners.iter().map(|p| p.partner_id).collect();
    let edges = hierarchy
        .edges_within(&present)
        .into_iter()
        .map(|(from, to)| GraphEdge { from, to })
        .collect();

    NetworkGraph { nodes, edges }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub level: Level,
    pub color: &'static str,
}

/// Level colours, in rank order
pub fn legend() -> Vec<LegendEntry> {
    Level::ALL.iter().map(|&level| LegendEntry { level, color: level.color() }).collect()
}

/// Template data for `network.html.tera`
#[derive(Debug, Clone, Serialize)]
pub(crate) struct NetworkContext<'a> {
    container_id: &'a str,
    width: &'a str,
    height: &'a str,
    /// Script-safe JSON
    nodes: String,
    edges: String,
    options: &'static str,
    legend: Vec<LegendEntry>,
}

impl<'a> NetworkContext<'a> {
    pub(crate) fn new(graph: &NetworkGraph, config: &'a GraphConfig, container_id: &'a str) -> DashboardResult<Self> {
        Ok(NetworkContext {
            container_id,
            width: config.width.as_str(),
            height: config.height.as_str(),
            nodes: script_json(&graph.nodes)?,
            edges: script_json(&graph.edges)?,
            options: NETWORK_OPTIONS,
            legend: legend(),
        })
    }
}

/// Self-contained HTML page for the graph
pub fn network_page(graph: &NetworkGraph, config: &GraphConfig) -> DashboardResult<String> {
    let mut context = Context::new();
    context.insert("vis_network_js", VIS_NETWORK_JS);
    context.insert("network", &NetworkContext::new(graph, config, "partner-network")?);
    templates::render(NETWORK_PAGE, &context)
}

/// Render the graph page, staging it through a temporary `.html` file in the
/// system temp directory.
pub fn render_network(graph: &NetworkGraph, config: &GraphConfig) -> DashboardResult<String> {
    render_network_in(graph, config, std::env::temp_dir())
}

/// Like [`render_network`], staging in `dir`. The staged file is removed
/// before returning, on success and on error alike.
pub fn render_network_in(graph: &NetworkGraph, config: &GraphConfig, dir: impl AsRef<Path>) -> DashboardResult<String> {
    let page = network_page(graph, config)?;
    stage(dir.as_ref(), &page, |staged| read_back(staged, page.len()))
}

/// Write `page` to a fresh temp file in `dir` and hand it to `finish`. The
/// file is deleted when it goes out of scope.
fn stage<F>(dir: &Path, page: &str, finish: F) -> DashboardResult<String>
where
    F: FnOnce(&mut NamedTempFile) -> DashboardResult<String>,
{
    let mut staged = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .suffix(".html")
        .tempfile_in(dir)?;
    staged.write_all(page.as_bytes())?;
    staged.flush()?;
    debug!("Staged network graph at {}", staged.path().display());
    finish(&mut staged)
}

fn read_back(staged: &mut NamedTempFile, expected: usize) -> DashboardResult<String> {
    staged.seek(SeekFrom::Start(0))?;
    let mut html = String::with_capacity(expected);
    staged.read_to_string(&mut html)?;

    if html.len() != expected {
        return Err(DashboardError::Render(format!(
            "staged graph truncated: wrote {} bytes, read {}",
            expected,
            html.len()
        )));
    }
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, Status};
    use chrono::NaiveDate;

    fn partners() -> Vec<Partner> {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        vec![
            Partner::new(1, "Root Distributor", Level::Distributor, None, day, Status::Active).with_revenue(250_000.0),
            Partner::new(2, "Partner 2", Level::Agent, Some(PartnerId(1)), day, Status::Active).with_revenue(45_000.0),
            Partner::new(3, "Partner <3>", Level::Ambassador, Some(PartnerId(2)), day, Status::Pending).with_revenue(1_000.0),
        ]
    }

    #[test]
    fn test_node_size_bounds() {
        let config = GraphConfig::default();
        assert_eq!(node_size(0.0, &config), 20);
        assert_eq!(node_size(45_000.0, &config), 22);
        assert_eq!(node_size(45_999.0, &config), 22);
        assert_eq!(node_size(1e9, &config), 50);
    }

    #[test]
    fn test_node_size_inverted_bounds() {
        let config = GraphConfig { min_node_size: 60, max_node_size: 50, ..GraphConfig::default() };
        assert_eq!(node_size(10_000.0, &config), 50);
        assert_eq!(node_size(1e9, &config), 50);
        let config = GraphConfig { revenue_per_size_unit: 0.0, ..GraphConfig::default() };
        assert_eq!(node_size(0.0, &config), 20);
    }

    #[test]
    fn test_edges_only_inside_filter() {
        let all = partners();
        let hierarchy = HierarchyView::build(&all);
        let kept: Vec<&Partner> = vec![&all[0], &all[2]];
        let graph = build_network(&kept, &hierarchy, None, &GraphConfig::default());
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.edges.is_empty());

        let kept: Vec<&Partner> = all.iter().collect();
        let graph = build_network(&kept, &hierarchy, None, &GraphConfig::default());
        assert_eq!(
            graph.edges,
            vec![
                GraphEdge { from: PartnerId(1), to: PartnerId(2) },
                GraphEdge { from: PartnerId(2), to: PartnerId(3) },
            ]
        );
    }

    #[test]
    fn test_selected_node_highlighted() {
        let all = partners();
        let kept: Vec<&Partner> = all.iter().collect();
        let graph = build_network(&kept, &HierarchyView::build(&all), Some(PartnerId(2)), &GraphConfig::default());
        let node = graph.node(PartnerId(2)).unwrap();
        assert_eq!(node.border_width, 3);
        assert_eq!(node.color.border, "#FF0000");
        assert_eq!(node.color.background, "#2ca02c");
        let other = graph.node(PartnerId(1)).unwrap();
        assert_eq!(other.border_width, 1);
        assert_eq!(other.color.border, "#000000");
        assert_eq!(other.size, 50);
    }

    #[test]
    fn test_render_embeds_graph() {
        let mut all = partners();
        all[2].name = "</script><b>3".to_string();
        let kept: Vec<&Partner> = all.iter().collect();
        let graph = build_network(&kept, &HierarchyView::build(&all), None, &GraphConfig::default());
        let html = render_network(&graph, &GraphConfig::default()).unwrap();
        assert!(html.contains("forceAtlas2Based"));
        assert!(!html.contains("</script><b>"));
        assert!(html.contains("Revenue: $45,000.00"));
        assert!(html.contains("600px"));
        assert!(html.contains("Network Legend"));
        for entry in legend() {
            assert!(html.contains(entry.color));
        }
    }

    fn staged_files(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(STAGING_PREFIX))
            .collect()
    }

    #[test]
    fn test_staged_file_removed_after_render() {
        let dir = tempfile::TempDir::new().unwrap();
        let all = partners();
        let kept: Vec<&Partner> = all.iter().collect();
        let graph = build_network(&kept, &HierarchyView::build(&all), None, &GraphConfig::default());
        let html = render_network_in(&graph, &GraphConfig::default(), dir.path()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(staged_files(dir.path()).is_empty());
    }

    #[test]
    fn test_staged_file_removed_on_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = stage(dir.path(), "<html></html>", |staged| {
            assert!(staged.path().exists());
            assert_eq!(staged_files(dir.path()).len(), 1);
            Err(DashboardError::Render("read back failed".to_string()))
        })
        .unwrap_err();
        assert!(matches!(err, DashboardError::Render(_)));
        assert!(staged_files(dir.path()).is_empty());
    }

    #[test]
    fn test_empty_graph_renders() {
        let html = render_network(&NetworkGraph::default(), &GraphConfig::default()).unwrap();
        assert!(html.contains("new vis.DataSet([])"));
    }
}
