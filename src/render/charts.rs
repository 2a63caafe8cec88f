//! Renderer-agnostic chart descriptions
//!
//! Builders return `None` when there is nothing to plot so callers can show a
//! "no data" placeholder instead of an empty chart.

use crate::analytics::{
    ActivityPoint, ComparisonProfile, LevelSummaryRow, Rankings, RevenuePoint, SocialPoint,
    COMPARISON_METRICS,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    /// Side-by-side bars, one per series
    GroupedBar,
    Line,
    StackedBar,
    Radar,
}

/// One named series; `x` and `y` have equal length
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Series { name: name.into(), x: Vec::new(), y: Vec::new() }
    }

    pub fn push(&mut self, x: impl ToString, y: f64) {
        self.x.push(x.to_string());
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Horizontal guide drawn across the plot, e.g. neutral sentiment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_line: Option<f64>,
}

impl ChartSpec {
    fn new(kind: ChartKind, title: &str, x_label: &str, y_label: &str, series: Vec<Series>) -> Option<Self> {
        if series.iter().all(Series::is_empty) {
            return None;
        }
        Some(ChartSpec {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            series,
            reference_line: None,
        })
    }

    fn with_reference_line(mut self, y: f64) -> Self {
        self.reference_line = Some(y);
        self
    }
}

fn level_series(name: &str, rows: &[LevelSummaryRow], value: impl Fn(&LevelSummaryRow) -> f64) -> Series {
    let mut s = Series::new(name);
    for row in rows {
        s.push(row.level, value(row));
    }
    s
}

pub fn revenue_by_level(rows: &[LevelSummaryRow]) -> Option<ChartSpec> {
    let s = level_series("Revenue", rows, |r| r.revenue);
    ChartSpec::new(ChartKind::Bar, "Revenue by Partner Level", "Level", "Revenue", vec![s])
}

pub fn activity_by_level(rows: &[LevelSummaryRow]) -> Option<ChartSpec> {
    let s = level_series("Activities", rows, |r| r.activity_count as f64);
    ChartSpec::new(ChartKind::Bar, "Activities by Partner Level", "Level", "Activity Count", vec![s])
}

/// Posts and shares stacked per level
pub fn social_by_level(rows: &[LevelSummaryRow]) -> Option<ChartSpec> {
    let posts = level_series("Posts", rows, |r| r.posts as f64);
    let shares = level_series("Shares", rows, |r| r.shares as f64);
    ChartSpec::new(ChartKind::StackedBar, "Social Engagement by Partner Level", "Level", "Count", vec![posts, shares])
}

/// Mean advocacy score and sentiment side by side per level
pub fn advocacy_sentiment_by_level(rows: &[LevelSummaryRow]) -> Option<ChartSpec> {
    let advocacy = level_series("Advocacy Score", rows, |r| r.advocacy_score);
    let sentiment = level_series("Sentiment", rows, |r| r.sentiment);
    ChartSpec::new(
        ChartKind::GroupedBar,
        "Advocacy & Sentiment by Partner Level",
        "Level",
        "Average",
        vec![advocacy, sentiment],
    )
}

pub fn revenue_over_time(points: &[RevenuePoint]) -> Option<ChartSpec> {
    let mut s = Series::new("Revenue");
    for p in points {
        s.push(p.date, p.revenue);
    }
    ChartSpec::new(ChartKind::Line, "Revenue Over Time", "Date", "Revenue", vec![s])
}

pub fn activity_over_time(points: &[ActivityPoint]) -> Option<ChartSpec> {
    let mut s = Series::new("Activities");
    for p in points {
        s.push(p.date, p.activity_count as f64);
    }
    ChartSpec::new(ChartKind::Line, "Activities Over Time", "Date", "Activity Count", vec![s])
}

pub fn posts_shares_over_time(points: &[SocialPoint]) -> Option<ChartSpec> {
    let mut posts = Series::new("Posts");
    let mut shares = Series::new("Shares");
    for p in points {
        posts.push(p.date, p.posts as f64);
        shares.push(p.date, p.shares as f64);
    }
    ChartSpec::new(ChartKind::Line, "Posts and Shares Over Time", "Date", "Count", vec![posts, shares])
}

/// Average sentiment with a neutral reference at zero
pub fn sentiment_over_time(points: &[SocialPoint]) -> Option<ChartSpec> {
    let mut s = Series::new("Sentiment");
    for p in points {
        s.push(p.date, p.sentiment);
    }
    ChartSpec::new(ChartKind::Line, "Average Sentiment Over Time", "Date", "Sentiment", vec![s])
        .map(|c| c.with_reference_line(0.0))
}

pub fn advocacy_over_time(points: &[SocialPoint]) -> Option<ChartSpec> {
    let mut s = Series::new("Advocacy Score");
    for p in points {
        s.push(p.date, p.advocacy_score);
    }
    ChartSpec::new(ChartKind::Line, "Average Advocacy Score Over Time", "Date", "Advocacy Score", vec![s])
}

/// Top partners for the ranked KPI
pub fn ranking_bar(rankings: &Rankings) -> Option<ChartSpec> {
    let mut s = Series::new(rankings.metric.display_name());
    for row in &rankings.top {
        s.push(&row.name, rankings.metric.value(row));
    }
    let title = format!("Top Partners by {}", rankings.metric);
    ChartSpec::new(ChartKind::Bar, &title, "Partner", rankings.metric.display_name(), vec![s])
}

/// One closed polygon per compared partner
pub fn comparison_radar(profiles: &[ComparisonProfile]) -> Option<ChartSpec> {
    let series = profiles
        .iter()
        .map(|p| {
            let mut s = Series::new(&p.name);
            for (metric, value) in COMPARISON_METRICS.iter().zip(p.values()) {
                s.push(metric.display_name(), value);
            }
            s
        })
        .collect();
    ChartSpec::new(ChartKind::Radar, "Partner KPI Comparison", "KPI", "Percent of maximum", series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, PartnerId};
    use chrono::NaiveDate;

    fn level_row(level: Level, revenue: f64) -> LevelSummaryRow {
        LevelSummaryRow {
            level,
            revenue,
            activity_count: 3,
            posts: 4,
            shares: 5,
            advocacy_score: 50.0,
            sentiment: 0.1,
        }
    }

    #[test]
    fn test_empty_inputs_give_none() {
        assert!(revenue_by_level(&[]).is_none());
        assert!(revenue_over_time(&[]).is_none());
        assert!(sentiment_over_time(&[]).is_none());
        assert!(comparison_radar(&[]).is_none());
    }

    #[test]
    fn test_level_bar() {
        let chart = revenue_by_level(&[level_row(Level::Distributor, 10.0), level_row(Level::Agent, 4.0)]).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.series[0].x, vec!["Distributor", "Agent"]);
        assert_eq!(chart.series[0].y, vec![10.0, 4.0]);

        let stacked = social_by_level(&[level_row(Level::Agent, 1.0)]).unwrap();
        assert_eq!(stacked.kind, ChartKind::StackedBar);
        assert_eq!(stacked.series.len(), 2);
    }

    #[test]
    fn test_advocacy_sentiment_grouped() {
        let mut agent = level_row(Level::Agent, 1.0);
        agent.sentiment = -0.25;
        let chart = advocacy_sentiment_by_level(&[level_row(Level::Distributor, 1.0), agent]).unwrap();
        assert_eq!(chart.kind, ChartKind::GroupedBar);
        assert_eq!(chart.series[0].name, "Advocacy Score");
        assert_eq!(chart.series[0].y, vec![50.0, 50.0]);
        assert_eq!(chart.series[1].y, vec![0.1, -0.25]);
        assert!(advocacy_sentiment_by_level(&[]).is_none());
    }

    #[test]
    fn test_sentiment_reference_line() {
        let points = vec![SocialPoint {
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            posts: 1,
            shares: 1,
            sentiment: -0.3,
            advocacy_score: 40.0,
            reviews: 0,
        }];
        let chart = sentiment_over_time(&points).unwrap();
        assert_eq!(chart.reference_line, Some(0.0));
        assert_eq!(chart.series[0].x, vec!["2025-02-01"]);
        assert!(advocacy_over_time(&points).unwrap().reference_line.is_none());
    }

    #[test]
    fn test_radar_axes() {
        let profile = ComparisonProfile {
            partner_id: PartnerId(4),
            name: "Partner 4".to_string(),
            revenue: 100.0,
            activity_count: 50.0,
            posts: 25.0,
            shares: 0.0,
            advocacy_score: 75.0,
        };
        let chart = comparison_radar(&[profile]).unwrap();
        assert_eq!(chart.kind, ChartKind::Radar);
        assert_eq!(chart.series[0].len(), 5);
        assert_eq!(chart.series[0].x[1], "Activity Count");
    }
}
