//! Tera templates for the HTML views
//!
//! Template sources are compiled into the binary. Autoescaping is on for
//! every `.html.tera` template, so only pre-serialized JSON is marked `safe`.

use crate::error::DashboardResult;
use tera::{Context, Tera};

pub(crate) const REPORT: &str = "report.html.tera";
pub(crate) const NETWORK_PAGE: &str = "network_page.html.tera";

pub(crate) const VIS_NETWORK_JS: &str = "https://unpkg.com/vis-network/standalone/umd/vis-network.min.js";

const SOURCES: [(&str, &str); 5] = [
    (REPORT, include_str!("templates/report.html.tera")),
    (NETWORK_PAGE, include_str!("templates/network_page.html.tera")),
    ("network.html.tera", include_str!("templates/network.html.tera")),
    ("table.html.tera", include_str!("templates/table.html.tera")),
    ("chart.html.tera", include_str!("templates/chart.html.tera")),
];

fn engine() -> DashboardResult<Tera> {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![".html.tera"]);
    tera.add_raw_templates(SOURCES)?;
    Ok(tera)
}

pub(crate) fn render(name: &str, context: &Context) -> DashboardResult<String> {
    Ok(engine()?.render(name, context)?)
}
