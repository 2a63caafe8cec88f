//! Table, JSON and CSV output for aggregate rows

use comfy_table::{ContentArrangement, Table};
use partnernet::analytics::{
    ActivityPoint, ActivitySummaryRow, ComparisonProfile, LevelSummaryRow, RevenuePoint,
    RevenueSummaryRow, SocialPoint, SocialSummaryRow, COMPARISON_METRICS,
};
use partnernet::render::{format_count, format_currency};
use partnernet::{KpiRow, Partner};
use serde::Serialize;

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Rows that know how to lay themselves out in a terminal table
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn cells(&self) -> Vec<String>;
}

pub fn emit<T: Tabular + Serialize>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        OutputFormat::Csv => {
            print!("{}", partnernet::io::to_csv_string(rows)?);
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no data)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(T::headers());
            for row in rows {
                table.add_row(row.cells());
            }

            println!("{}", table);
            println!("{} row(s)", rows.len());
        }
    }
    Ok(())
}

impl Tabular for KpiRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Level", "Status", "Revenue", "Activities", "Posts", "Shares", "Sentiment", "Advocacy", "Reviews"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.partner_id.to_string(),
            self.name.clone(),
            self.level.to_string(),
            self.status.to_string(),
            format_currency(self.revenue),
            format_count(self.activity_count),
            format_count(self.posts),
            format_count(self.shares),
            format!("{:.2}", self.sentiment),
            format!("{:.1}", self.advocacy_score),
            self.reviews.to_string(),
        ]
    }
}

impl Tabular for RevenueSummaryRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Level", "Status", "Revenue"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.partner_id.to_string(),
            self.name.clone(),
            self.level.to_string(),
            self.status.to_string(),
            format_currency(self.revenue),
        ]
    }
}

impl Tabular for ActivitySummaryRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Level", "Status", "Activities"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.partner_id.to_string(),
            self.name.clone(),
            self.level.to_string(),
            self.status.to_string(),
            format_count(self.activity_count),
        ]
    }
}

impl Tabular for SocialSummaryRow {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Level", "Posts", "Shares", "Sentiment", "Advocacy", "Reviews"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.partner_id.to_string(),
            self.name.clone(),
            self.level.to_string(),
            format_count(self.posts),
            format_count(self.shares),
            format!("{:.2}", self.sentiment),
            format!("{:.1}", self.advocacy_score),
            self.reviews.to_string(),
        ]
    }
}

impl Tabular for LevelSummaryRow {
    fn headers() -> Vec<&'static str> {
        vec!["Level", "Revenue", "Activities", "Posts", "Shares", "Advocacy", "Sentiment"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.level.to_string(),
            format_currency(self.revenue),
            format_count(self.activity_count),
            format_count(self.posts),
            format_count(self.shares),
            format!("{:.1}", self.advocacy_score),
            format!("{:.2}", self.sentiment),
        ]
    }
}

impl Tabular for RevenuePoint {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Revenue"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.date.to_string(), format_currency(self.revenue)]
    }
}

impl Tabular for ActivityPoint {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Activities"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.date.to_string(), self.activity_count.to_string()]
    }
}

impl Tabular for SocialPoint {
    fn headers() -> Vec<&'static str> {
        vec!["Date", "Posts", "Shares", "Sentiment", "Advocacy", "Reviews"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.date.to_string(),
            self.posts.to_string(),
            self.shares.to_string(),
            format!("{:.2}", self.sentiment),
            format!("{:.1}", self.advocacy_score),
            self.reviews.to_string(),
        ]
    }
}

impl Tabular for Partner {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Level", "Parent", "Joined", "Status", "Revenue"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.partner_id.to_string(),
            self.name.clone(),
            self.level.to_string(),
            self.parent_id.map_or_else(|| "-".to_string(), |p| p.to_string()),
            self.join_date.to_string(),
            self.status.to_string(),
            format_currency(self.total_revenue),
        ]
    }
}

impl Tabular for ComparisonProfile {
    fn headers() -> Vec<&'static str> {
        let mut h = vec!["ID", "Name"];
        h.extend(COMPARISON_METRICS.iter().map(|m| m.display_name()));
        h
    }

    fn cells(&self) -> Vec<String> {
        let mut c = vec![self.partner_id.to_string(), self.name.clone()];
        c.extend(self.values().iter().map(|v| format!("{:.1}", v)));
        c
    }
}
