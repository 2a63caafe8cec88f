//! Multi-KPI comparison of a handful of partners

use super::ranking::KpiMetric;
use super::summary::KpiRow;
use crate::error::{DashboardError, DashboardResult};
use crate::model::PartnerId;
use serde::Serialize;

/// Metrics plotted on the comparison radar, in axis order
pub const COMPARISON_METRICS: [KpiMetric; 5] = [
    KpiMetric::Revenue,
    KpiMetric::ActivityCount,
    KpiMetric::Posts,
    KpiMetric::Shares,
    KpiMetric::AdvocacyScore,
];

/// One partner's metrics scaled to 0..=100 of the table maximum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonProfile {
    pub partner_id: PartnerId,
    pub name: String,
    pub revenue: f64,
    pub activity_count: f64,
    pub posts: f64,
    pub shares: f64,
    pub advocacy_score: f64,
}

impl ComparisonProfile {
    /// Normalized values aligned with [`COMPARISON_METRICS`]
    pub fn values(&self) -> [f64; 5] {
        [self.revenue, self.activity_count, self.posts, self.shares, self.advocacy_score]
    }
}

/// Normalize each comparison metric by its maximum over the whole KPI table
/// (1 when that maximum is not positive). Ids without a KPI row are skipped.
pub fn compare(rows: &[KpiRow], ids: &[PartnerId], max: usize) -> DashboardResult<Vec<ComparisonProfile>> {
    if ids.len() > max {
        return Err(DashboardError::TooManySelections { max, got: ids.len() });
    }

    let scale: Vec<f64> = COMPARISON_METRICS
        .iter()
        .map(|m| {
            let top = rows.iter().map(|r| m.value(r)).fold(f64::NEG_INFINITY, f64::max);
            if top > 0.0 { top } else { 1.0 }
        })
        .collect();

    Ok(rows
        .iter()
        .filter(|r| ids.contains(&r.partner_id))
        .map(|r| {
            let pct = |i: usize| COMPARISON_METRICS[i].value(r) / scale[i] * 100.0;
            ComparisonProfile {
                partner_id: r.partner_id,
                name: r.name.clone(),
                revenue: pct(0),
                activity_count: pct(1),
                posts: pct(2),
                shares: pct(3),
                advocacy_score: pct(4),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, Status};

    fn row(id: u64, revenue: f64, posts: u64) -> KpiRow {
        KpiRow {
            partner_id: PartnerId(id),
            revenue,
            name: format!("Partner {}", id),
            level: Level::Ambassador,
            status: Status::Premium,
            activity_count: 10,
            posts,
            shares: 0,
            sentiment: 0.0,
            advocacy_score: 50.0,
            reviews: 0,
        }
    }

    #[test]
    fn test_normalized_against_table_max() {
        let rows = vec![row(1, 200.0, 4), row(2, 50.0, 2), row(3, 400.0, 8)];
        let out = compare(&rows, &[PartnerId(2), PartnerId(1)], 5).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].partner_id, PartnerId(1));
        assert_eq!(out[0].values(), [50.0, 100.0, 50.0, 0.0, 100.0]);
        assert_eq!(out[1].revenue, 12.5);
    }

    #[test]
    fn test_zero_column_uses_unit_scale() {
        let rows = vec![row(1, 0.0, 0)];
        let out = compare(&rows, &[PartnerId(1)], 5).unwrap();
        assert_eq!(out[0].revenue, 0.0);
        assert_eq!(out[0].shares, 0.0);
        assert_eq!(out[0].advocacy_score, 100.0);
    }

    #[test]
    fn test_selection_limit() {
        let rows = vec![row(1, 1.0, 1)];
        let ids: Vec<_> = (1..=6).map(PartnerId).collect();
        assert!(matches!(
            compare(&rows, &ids, 5),
            Err(DashboardError::TooManySelections { max: 5, got: 6 })
        ));
        assert!(compare(&rows, &[], 5).unwrap().is_empty());
    }
}
