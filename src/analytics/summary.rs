//! Per-partner and per-level KPI summaries

use super::aggregate::{AggregateType, GroupedAggregate};
use super::filter::FilteredView;
use crate::model::{Level, Partner, PartnerId, Status};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Revenue per partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummaryRow {
    pub partner_id: PartnerId,
    pub revenue: f64,
    pub name: String,
    pub level: Level,
    pub status: Status,
}

/// Activity rows per partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummaryRow {
    pub partner_id: PartnerId,
    pub activity_count: u64,
    pub name: String,
    pub level: Level,
    pub status: Status,
}

/// Social totals and averages per partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSummaryRow {
    pub partner_id: PartnerId,
    pub posts: u64,
    pub shares: u64,
    pub sentiment: f64,
    pub advocacy_score: f64,
    pub reviews: u64,
    pub name: String,
    pub level: Level,
    pub status: Status,
}

/// Combined per-partner KPI row used for ranking and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiRow {
    pub partner_id: PartnerId,
    pub revenue: f64,
    pub name: String,
    pub level: Level,
    pub status: Status,
    pub activity_count: u64,
    pub posts: u64,
    pub shares: u64,
    pub sentiment: f64,
    pub advocacy_score: f64,
    pub reviews: u64,
}

impl KpiRow {
    fn blank(partner_id: PartnerId, name: &str, level: Level, status: Status) -> Self {
        KpiRow {
            partner_id,
            revenue: 0.0,
            name: name.to_string(),
            level,
            status,
            activity_count: 0,
            posts: 0,
            shares: 0,
            sentiment: 0.0,
            advocacy_score: 0.0,
            reviews: 0,
        }
    }
}

/// Aggregates per partner level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSummaryRow {
    pub level: Level,
    pub revenue: f64,
    pub activity_count: u64,
    pub posts: u64,
    pub shares: u64,
    pub advocacy_score: f64,
    pub sentiment: f64,
}

impl LevelSummaryRow {
    fn blank(level: Level) -> Self {
        LevelSummaryRow {
            level,
            revenue: 0.0,
            activity_count: 0,
            posts: 0,
            shares: 0,
            advocacy_score: 0.0,
            sentiment: 0.0,
        }
    }
}

/// Dashboard headline figures over the filtered fact tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub total_revenue: f64,
    pub total_activities: u64,
    pub total_posts: u64,
    pub total_shares: u64,
    pub total_reviews: u64,
    /// `None` when there are no social rows
    pub avg_sentiment: Option<f64>,
    pub avg_advocacy: Option<f64>,
}

/// The three per-partner summaries and their merge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summaries {
    pub revenue: Vec<RevenueSummaryRow>,
    pub activity: Vec<ActivitySummaryRow>,
    pub social: Vec<SocialSummaryRow>,
    pub kpi: Vec<KpiRow>,
}

fn dimension<'a>(view: &FilteredView<'a>) -> FxHashMap<PartnerId, &'a Partner> {
    view.partners.iter().map(|p| (p.partner_id, *p)).collect()
}

/// Sum of revenue per partner, joined with the partner dimension
pub fn revenue_summary(view: &FilteredView) -> Vec<RevenueSummaryRow> {
    let dim = dimension(view);
    let mut agg = GroupedAggregate::new(&[AggregateType::Sum]);
    for s in &view.sales {
        agg.update(s.partner_id, &[s.revenue]);
    }
    agg.finish()
        .into_iter()
        .filter_map(|(id, values)| {
            let p = dim.get(&id)?;
            Some(RevenueSummaryRow {
                partner_id: id,
                revenue: values[0],
                name: p.name.clone(),
                level: p.level,
                status: p.status,
            })
        })
        .collect()
}

/// Number of activity rows per partner
pub fn activity_summary(view: &FilteredView) -> Vec<ActivitySummaryRow> {
    let dim = dimension(view);
    let mut agg = GroupedAggregate::new(&[AggregateType::Count]);
    for a in &view.activity {
        agg.update(a.partner_id, &[]);
    }
    agg.finish()
        .into_iter()
        .filter_map(|(id, values)| {
            let p = dim.get(&id)?;
            Some(ActivitySummaryRow {
                partner_id: id,
                activity_count: values[0] as u64,
                name: p.name.clone(),
                level: p.level,
                status: p.status,
            })
        })
        .collect()
}

/// Posts, shares and reviews summed; sentiment and advocacy averaged
pub fn social_summary(view: &FilteredView) -> Vec<SocialSummaryRow> {
    let dim = dimension(view);
    let mut agg = GroupedAggregate::new(&[
        AggregateType::Sum,
        AggregateType::Sum,
        AggregateType::Avg,
        AggregateType::Avg,
        AggregateType::Sum,
    ]);
    for s in &view.social {
        agg.update(
            s.partner_id,
            &[
                s.posts as f64,
                s.shares as f64,
                s.sentiment,
                s.advocacy_score as f64,
                s.reviews as f64,
            ],
        );
    }
    agg.finish()
        .into_iter()
        .filter_map(|(id, v)| {
            let p = dim.get(&id)?;
            Some(SocialSummaryRow {
                partner_id: id,
                posts: v[0] as u64,
                shares: v[1] as u64,
                sentiment: v[2],
                advocacy_score: v[3],
                reviews: v[4] as u64,
                name: p.name.clone(),
                level: p.level,
                status: p.status,
            })
        })
        .collect()
}

/// Outer merge of the three summaries on partner id; missing values are 0
pub fn kpi_summary(
    revenue: &[RevenueSummaryRow],
    activity: &[ActivitySummaryRow],
    social: &[SocialSummaryRow],
) -> Vec<KpiRow> {
    let mut rows: BTreeMap<PartnerId, KpiRow> = BTreeMap::new();

    for r in revenue {
        rows.entry(r.partner_id)
            .or_insert_with(|| KpiRow::blank(r.partner_id, &r.name, r.level, r.status))
            .revenue = r.revenue;
    }
    for a in activity {
        rows.entry(a.partner_id)
            .or_insert_with(|| KpiRow::blank(a.partner_id, &a.name, a.level, a.status))
            .activity_count = a.activity_count;
    }
    for s in social {
        let row = rows
            .entry(s.partner_id)
            .or_insert_with(|| KpiRow::blank(s.partner_id, &s.name, s.level, s.status));
        row.posts = s.posts;
        row.shares = s.shares;
        row.sentiment = s.sentiment;
        row.advocacy_score = s.advocacy_score;
        row.reviews = s.reviews;
    }

    rows.into_values().collect()
}

/// All per-partner summaries for a filtered view
pub fn summarize(view: &FilteredView) -> Summaries {
    let revenue = revenue_summary(view);
    let activity = activity_summary(view);
    let social = social_summary(view);
    let kpi = kpi_summary(&revenue, &activity, &social);
    Summaries {
        revenue,
        activity,
        social,
        kpi,
    }
}

/// Same reductions grouped by partner level, ordered by level rank
pub fn level_summary(view: &FilteredView) -> Vec<LevelSummaryRow> {
    let dim = dimension(view);
    let level_of = |id: &PartnerId| dim.get(id).map(|p| p.level);

    let mut revenue = GroupedAggregate::new(&[AggregateType::Sum]);
    for s in &view.sales {
        if let Some(level) = level_of(&s.partner_id) {
            revenue.update(level, &[s.revenue]);
        }
    }

    let mut activity = GroupedAggregate::new(&[AggregateType::Count]);
    for a in &view.activity {
        if let Some(level) = level_of(&a.partner_id) {
            activity.update(level, &[]);
        }
    }

    let mut social = GroupedAggregate::new(&[
        AggregateType::Sum,
        AggregateType::Sum,
        AggregateType::Avg,
        AggregateType::Avg,
    ]);
    for s in &view.social {
        if let Some(level) = level_of(&s.partner_id) {
            social.update(
                level,
                &[s.posts as f64, s.shares as f64, s.advocacy_score as f64, s.sentiment],
            );
        }
    }

    let mut rows: BTreeMap<Level, LevelSummaryRow> = BTreeMap::new();
    for (level, v) in revenue.finish() {
        rows.entry(level).or_insert_with(|| LevelSummaryRow::blank(level)).revenue = v[0];
    }
    for (level, v) in activity.finish() {
        rows.entry(level).or_insert_with(|| LevelSummaryRow::blank(level)).activity_count = v[0] as u64;
    }
    for (level, v) in social.finish() {
        let row = rows.entry(level).or_insert_with(|| LevelSummaryRow::blank(level));
        row.posts = v[0] as u64;
        row.shares = v[1] as u64;
        row.advocacy_score = v[2];
        row.sentiment = v[3];
    }
    rows.into_values().collect()
}

/// Totals shown above the dashboard and social tabs
pub fn headline(view: &FilteredView) -> Headline {
    let social_rows = view.social.len();
    let mean = |total: f64| (social_rows > 0).then(|| total / social_rows as f64);

    Headline {
        total_revenue: view.sales.iter().map(|s| s.revenue).sum(),
        total_activities: view.activity.len() as u64,
        total_posts: view.social.iter().map(|s| s.posts as u64).sum(),
        total_shares: view.social.iter().map(|s| s.shares as u64).sum(),
        total_reviews: view.social.iter().map(|s| s.reviews as u64).sum(),
        avg_sentiment: mean(view.social.iter().map(|s| s.sentiment).sum()),
        avg_advocacy: mean(view.social.iter().map(|s| s.advocacy_score as f64).sum()),
    }
}
