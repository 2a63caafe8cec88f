//! Partner rankings over the combined KPI table

use super::summary::KpiRow;
use crate::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rankable KPI column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KpiMetric {
    Revenue,
    ActivityCount,
    Posts,
    Shares,
    Sentiment,
    AdvocacyScore,
}

impl KpiMetric {
    pub const ALL: [KpiMetric; 6] = [
        KpiMetric::Revenue,
        KpiMetric::ActivityCount,
        KpiMetric::Posts,
        KpiMetric::Shares,
        KpiMetric::Sentiment,
        KpiMetric::AdvocacyScore,
    ];

    /// Label shown in the KPI selector
    pub fn display_name(&self) -> &'static str {
        match self {
            KpiMetric::Revenue => "Revenue",
            KpiMetric::ActivityCount => "Activity Count",
            KpiMetric::Posts => "Posts",
            KpiMetric::Shares => "Shares",
            KpiMetric::Sentiment => "Sentiment",
            KpiMetric::AdvocacyScore => "Advocacy Score",
        }
    }

    /// Column name in the KPI table and its CSV export
    pub fn column(&self) -> &'static str {
        match self {
            KpiMetric::Revenue => "revenue",
            KpiMetric::ActivityCount => "activity_count",
            KpiMetric::Posts => "posts",
            KpiMetric::Shares => "shares",
            KpiMetric::Sentiment => "sentiment",
            KpiMetric::AdvocacyScore => "advocacy_score",
        }
    }

    pub fn value(&self, row: &KpiRow) -> f64 {
        match self {
            KpiMetric::Revenue => row.revenue,
            KpiMetric::ActivityCount => row.activity_count as f64,
            KpiMetric::Posts => row.posts as f64,
            KpiMetric::Shares => row.shares as f64,
            KpiMetric::Sentiment => row.sentiment,
            KpiMetric::AdvocacyScore => row.advocacy_score,
        }
    }
}

impl fmt::Display for KpiMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for KpiMetric {
    type Err = DashboardError;

    /// Accepts either the display name or the column name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        KpiMetric::ALL
            .iter()
            .copied()
            .find(|m| m.column() == wanted)
            .ok_or_else(|| DashboardError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Sort by `metric` and keep the first `k` rows. The sort is stable, so ties
/// keep their input order in both directions.
pub fn rank(rows: &[KpiRow], metric: KpiMetric, order: SortOrder, k: usize) -> Vec<KpiRow> {
    let mut sorted: Vec<&KpiRow> = rows.iter().collect();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| metric.value(a).total_cmp(&metric.value(b))),
        SortOrder::Descending => sorted.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a))),
    }
    sorted.into_iter().take(k).cloned().collect()
}

/// Top and bottom partners for the selected KPI
#[derive(Debug, Clone, PartialEq)]
pub struct Rankings {
    pub metric: KpiMetric,
    pub top: Vec<KpiRow>,
    pub bottom: Vec<KpiRow>,
}

pub fn rankings(rows: &[KpiRow], metric: KpiMetric, k: usize) -> Rankings {
    Rankings {
        metric,
        top: rank(rows, metric, SortOrder::Descending, k),
        bottom: rank(rows, metric, SortOrder::Ascending, k),
    }
}

/// Fixed top/bottom performer lists
#[derive(Debug, Clone, PartialEq)]
pub struct Leaderboards {
    pub top_revenue: Vec<KpiRow>,
    pub bottom_revenue: Vec<KpiRow>,
    pub top_activity: Vec<KpiRow>,
    pub bottom_activity: Vec<KpiRow>,
    pub top_advocacy: Vec<KpiRow>,
    pub top_engagement: Vec<KpiRow>,
    pub top_sentiment: Vec<KpiRow>,
}

pub fn leaderboards(rows: &[KpiRow], k: usize) -> Leaderboards {
    use KpiMetric::*;
    use SortOrder::*;
    Leaderboards {
        top_revenue: rank(rows, Revenue, Descending, k),
        bottom_revenue: rank(rows, Revenue, Ascending, k),
        top_activity: rank(rows, ActivityCount, Descending, k),
        bottom_activity: rank(rows, ActivityCount, Ascending, k),
        top_advocacy: rank(rows, AdvocacyScore, Descending, k),
        top_engagement: rank(rows, Posts, Descending, k),
        top_sentiment: rank(rows, Sentiment, Descending, k),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, PartnerId, Status};

    fn row(id: u64, revenue: f64, posts: u64) -> KpiRow {
        KpiRow {
            partner_id: PartnerId(id),
            revenue,
            name: format!("Partner {}", id),
            level: Level::Agent,
            status: Status::Active,
            activity_count: id,
            posts,
            shares: 0,
            sentiment: 0.0,
            advocacy_score: 0.0,
            reviews: 0,
        }
    }

    fn ids(rows: &[KpiRow]) -> Vec<u64> {
        rows.iter().map(|r| r.partner_id.as_u64()).collect()
    }

    #[test]
    fn test_descending_with_stable_ties() {
        let rows = vec![row(1, 50.0, 3), row(2, 90.0, 3), row(3, 50.0, 1), row(4, 10.0, 3)];
        assert_eq!(ids(&rank(&rows, KpiMetric::Revenue, SortOrder::Descending, 10)), vec![2, 1, 3, 4]);
        assert_eq!(ids(&rank(&rows, KpiMetric::Posts, SortOrder::Descending, 2)), vec![1, 2]);
    }

    #[test]
    fn test_ascending_truncates() {
        let rows = vec![row(1, 50.0, 3), row(2, 90.0, 3), row(3, 50.0, 1), row(4, 10.0, 3)];
        assert_eq!(ids(&rank(&rows, KpiMetric::Revenue, SortOrder::Ascending, 3)), vec![4, 1, 3]);
        assert!(rank(&rows, KpiMetric::Revenue, SortOrder::Ascending, 0).is_empty());
        assert!(rank(&[], KpiMetric::Revenue, SortOrder::Ascending, 5).is_empty());
    }

    #[test]
    fn test_metric_parsing() {
        assert_eq!("Activity Count".parse::<KpiMetric>().unwrap(), KpiMetric::ActivityCount);
        assert_eq!("advocacy_score".parse::<KpiMetric>().unwrap(), KpiMetric::AdvocacyScore);
        assert_eq!("REVENUE".parse::<KpiMetric>().unwrap(), KpiMetric::Revenue);
        assert!(matches!("likes".parse::<KpiMetric>(), Err(DashboardError::UnknownMetric(_))));
    }

    #[test]
    fn test_leaderboards_sizes() {
        let rows: Vec<_> = (1..=8).map(|i| row(i, i as f64 * 10.0, 8 - i)).collect();
        let boards = leaderboards(&rows, 5);
        assert_eq!(ids(&boards.top_revenue), vec![8, 7, 6, 5, 4]);
        assert_eq!(ids(&boards.bottom_activity), vec![1, 2, 3, 4, 5]);
        assert_eq!(ids(&boards.top_engagement), vec![1, 2, 3, 4, 5]);
    }
}
