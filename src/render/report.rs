//! Static HTML dashboard report
//!
//! One self-contained page with the dashboard tabs, rendered from
//! `report.html.tera`. Charts are embedded as JSON specs; every empty panel
//! renders an explicit placeholder.

use super::charts::ChartSpec;
use super::format::{format_count, format_currency, script_json};
use super::network::NetworkContext;
use super::templates::{self, REPORT, VIS_NETWORK_JS};
use crate::analytics::{Headline, KpiRow, Leaderboards, PartnerDetail, Rankings};
use crate::error::DashboardResult;
use crate::io::{
    ACTIVITY_SERIES_FILE, ACTIVITY_SUMMARY_FILE, KPI_SUMMARY_FILE, REVENUE_SERIES_FILE,
    REVENUE_SUMMARY_FILE, SOCIAL_SERIES_FILE, SOCIAL_SUMMARY_FILE,
};
use crate::model::Partner;
use crate::pipeline::{DashboardView, Panel};
use serde::Serialize;
use tera::Context;
use tracing::debug;

pub const NO_DATA: &str = "No data available";

pub const TABS: [&str; 6] = [
    "Network Graph",
    "Partner Details",
    "Dashboard",
    "Social & Digital KPIs",
    "Performance",
    "Export",
];

const EXPORT_FILES: [&str; 7] = [
    REVENUE_SUMMARY_FILE,
    ACTIVITY_SUMMARY_FILE,
    SOCIAL_SUMMARY_FILE,
    KPI_SUMMARY_FILE,
    REVENUE_SERIES_FILE,
    ACTIVITY_SERIES_FILE,
    SOCIAL_SERIES_FILE,
];

/// Rows for `table.html.tera`; no rows renders the placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Table {
    title: Option<String>,
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&'static str], rows: impl IntoIterator<Item = Vec<String>>) -> Self {
        Table { title: None, headers: headers.to_vec(), rows: rows.into_iter().collect() }
    }

    fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Data for `chart.html.tera`
#[derive(Debug, Clone, Serialize)]
struct Chart {
    title: String,
    /// Script-safe JSON spec; `None` shows the placeholder
    spec: Option<String>,
    placeholder: String,
}

#[derive(Debug, Clone, Serialize)]
struct Metric {
    label: &'static str,
    value: String,
}

#[derive(Debug, Clone, Serialize)]
struct DetailSection {
    name: String,
    attributes: Table,
    transactions: Table,
    breakdown: Table,
}

#[derive(Serialize)]
struct ReportPage<'a> {
    vis_network_js: &'static str,
    tabs: [&'static str; 6],
    no_data: &'static str,
    partner_count: usize,
    network: Option<NetworkContext<'a>>,
    network_placeholder: String,
    detail: Option<DetailSection>,
    /// Shown on the detail tab while no partner is selected
    partner_table: Option<Table>,
    detail_placeholder: String,
    headline: Option<Vec<Metric>>,
    headline_placeholder: String,
    dashboard_charts: Vec<Chart>,
    social_charts: Vec<Chart>,
    rankings: Option<Vec<Table>>,
    rankings_placeholder: String,
    ranking_chart: Chart,
    leaderboards: Vec<Table>,
    comparison_chart: Chart,
    exports: Table,
}

fn placeholder<T>(panel: &Panel<T>) -> String {
    match panel {
        Panel::Failed(msg) => format!("{}: {}", NO_DATA, msg),
        _ => NO_DATA.to_string(),
    }
}

fn chart(panel: &Panel<ChartSpec>) -> DashboardResult<Chart> {
    Ok(match panel {
        Panel::Ready(spec) => Chart {
            title: spec.title.clone(),
            spec: Some(script_json(spec)?),
            placeholder: NO_DATA.to_string(),
        },
        other => Chart { title: String::new(), spec: None, placeholder: placeholder(other) },
    })
}

fn charts<'p>(panels: impl IntoIterator<Item = &'p Panel<ChartSpec>>) -> DashboardResult<Vec<Chart>> {
    panels.into_iter().map(chart).collect()
}

fn kpi_table(rows: &[KpiRow]) -> Table {
    Table::new(
        &["Partner", "Level", "Revenue", "Activities", "Posts", "Shares", "Sentiment", "Advocacy"],
        rows.iter().map(|r| {
            vec![
                r.name.clone(),
                r.level.to_string(),
                format_currency(r.revenue),
                format_count(r.activity_count),
                format_count(r.posts),
                format_count(r.shares),
                format!("{:.2}", r.sentiment),
                format!("{:.1}", r.advocacy_score),
            ]
        }),
    )
}

fn partner_table(partners: &[Partner]) -> Table {
    Table::new(
        &["ID", "Name", "Level", "Status", "Join Date", "Revenue", "Posts", "Shares", "Sentiment", "Advocacy"],
        partners.iter().map(|p| {
            vec![
                p.partner_id.to_string(),
                p.name.clone(),
                p.level.to_string(),
                p.status.to_string(),
                p.join_date.to_string(),
                format_currency(p.total_revenue),
                format_count(p.posts.into()),
                format_count(p.shares.into()),
                format!("{:.2}", p.sentiment),
                p.advocacy_score.to_string(),
            ]
        }),
    )
    .titled("Partner Dataset Table")
}

fn headline_metrics(h: &Headline) -> Vec<Metric> {
    let avg = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
    vec![
        Metric { label: "Total Revenue", value: format_currency(h.total_revenue) },
        Metric { label: "Total Activities", value: format_count(h.total_activities) },
        Metric { label: "Total Posts", value: format_count(h.total_posts) },
        Metric { label: "Total Shares", value: format_count(h.total_shares) },
        Metric { label: "Reviews", value: format_count(h.total_reviews) },
        Metric { label: "Avg Sentiment", value: avg(h.avg_sentiment) },
        Metric { label: "Avg Advocacy", value: avg(h.avg_advocacy) },
    ]
}

fn detail_section(d: &PartnerDetail) -> DetailSection {
    let p = &d.partner;
    let attribute = |name: &str, value: String| vec![name.to_string(), value];
    let attributes = Table::new(
        &["Attribute", "Value"],
        [
            attribute("Partner ID", p.partner_id.to_string()),
            attribute("Level", p.level.to_string()),
            attribute("Status", p.status.to_string()),
            attribute("Join Date", p.join_date.to_string()),
            attribute("Total Revenue", format_currency(p.total_revenue)),
            attribute("Advocacy Score", format!("{} of 100", p.advocacy_score)),
            attribute("Sentiment", format!("{:.2}", p.sentiment)),
            attribute("Parent", d.parent.as_ref().map_or("-".to_string(), |pp| pp.name.clone())),
            attribute("Children", d.children.len().to_string()),
            attribute("Depth", d.depth.to_string()),
            attribute("Downline", d.downline.to_string()),
        ],
    );
    let transactions = Table::new(
        &["Date", "Transaction", "Product", "Revenue"],
        d.recent_transactions.iter().map(|s| {
            vec![s.date.to_string(), s.transaction_id.clone(), s.product.clone(), format_currency(s.revenue)]
        }),
    )
    .titled("Recent Transactions");
    let breakdown = Table::new(
        &["Activity", "Count"],
        d.activity_breakdown
            .iter()
            .map(|c| vec![c.activity_type.to_string(), c.count.to_string()]),
    )
    .titled("Activity Breakdown");

    DetailSection { name: p.name.clone(), attributes, transactions, breakdown }
}

fn ranking_tables(r: &Rankings) -> Vec<Table> {
    let metric = r.metric.display_name();
    vec![
        kpi_table(&r.top).titled(format!("Top {} by {}", r.top.len(), metric)),
        kpi_table(&r.bottom).titled(format!("Bottom {} by {}", r.bottom.len(), metric)),
    ]
}

fn leaderboard_tables(boards: &Leaderboards) -> Vec<Table> {
    [
        ("Top Revenue", &boards.top_revenue),
        ("Bottom Revenue", &boards.bottom_revenue),
        ("Most Active", &boards.top_activity),
        ("Least Active", &boards.bottom_activity),
        ("Top Advocates", &boards.top_advocacy),
        ("Most Engaged", &boards.top_engagement),
        ("Most Positive Sentiment", &boards.top_sentiment),
    ]
    .into_iter()
    .map(|(title, rows)| kpi_table(rows).titled(title))
    .collect()
}

/// Render the full dashboard as a single HTML page
pub fn render_report(view: &DashboardView) -> DashboardResult<String> {
    let c = &view.charts;
    let partner_table = match (&view.detail, view.filters.selected) {
        (Panel::Ready(_), _) | (_, Some(_)) => None,
        (_, None) => Some(partner_table(view.partners.ready().map(Vec::as_slice).unwrap_or_default())),
    };

    let page = ReportPage {
        vis_network_js: VIS_NETWORK_JS,
        tabs: TABS,
        no_data: NO_DATA,
        partner_count: view.partner_count,
        network: match &view.network {
            Panel::Ready(graph) => Some(NetworkContext::new(graph, &view.options.graph, "partner-network")?),
            _ => None,
        },
        network_placeholder: placeholder(&view.network),
        detail: view.detail.ready().map(detail_section),
        partner_table,
        detail_placeholder: placeholder(&view.detail),
        headline: view.headline.ready().map(headline_metrics),
        headline_placeholder: placeholder(&view.headline),
        dashboard_charts: charts([
            &c.revenue_by_level,
            &c.activity_by_level,
            &c.revenue_over_time,
            &c.activity_over_time,
        ])?,
        social_charts: charts([
            &c.posts_shares_over_time,
            &c.sentiment_over_time,
            &c.advocacy_over_time,
            &c.social_by_level,
            &c.advocacy_sentiment_by_level,
        ])?,
        rankings: view.rankings.ready().map(ranking_tables),
        rankings_placeholder: placeholder(&view.rankings),
        ranking_chart: chart(&c.ranking)?,
        leaderboards: view.leaderboards.ready().map(leaderboard_tables).unwrap_or_default(),
        comparison_chart: chart(&c.comparison)?,
        exports: if view.summaries.kpi.is_empty() {
            Table::new(&["File"], Vec::new())
        } else {
            Table::new(&["File"], EXPORT_FILES.iter().map(|f| vec![f.to_string()]))
        },
    };

    let html = templates::render(REPORT, &Context::from_serialize(&page)?)?;
    debug!("Rendered report ({} bytes)", html.len());
    Ok(html)
}
