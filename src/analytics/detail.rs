//! Drill-down for a single partner
//!
//! Reads the full, unfiltered dataset so the detail page is stable while the
//! sidebar filters change.

use super::timeseries::{activity_by_date, revenue_by_date, ActivityPoint, RevenuePoint};
use crate::dataset::Dataset;
use crate::error::{DashboardError, DashboardResult};
use crate::model::{ActivityRecord, ActivityType, FactRecord, Partner, PartnerId, SalesRecord, SocialRecord};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Rows shown in the "recent" tables
pub const RECENT_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityTypeCount {
    pub activity_type: ActivityType,
    pub count: u64,
}

/// Everything the partner detail tabs display
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerDetail {
    pub partner: Partner,
    pub parent: Option<Partner>,
    pub children: Vec<Partner>,
    /// Levels below the root
    pub depth: usize,
    /// Partners anywhere below this one
    pub downline: usize,
    pub revenue_by_date: Vec<RevenuePoint>,
    pub recent_transactions: Vec<SalesRecord>,
    pub activity_breakdown: Vec<ActivityTypeCount>,
    pub activity_timeline: Vec<ActivityPoint>,
    pub recent_activities: Vec<ActivityRecord>,
    pub social: Vec<SocialRecord>,
}

/// Newest `RECENT_ROWS` records, newest first; same-day records keep table order
fn most_recent<T: FactRecord + Clone>(rows: &[&T]) -> Vec<T> {
    let mut recent: Vec<T> = rows.iter().map(|r| (*r).clone()).collect();
    recent.sort_by_key(|r| Reverse(r.date()));
    recent.truncate(RECENT_ROWS);
    recent
}

pub fn partner_detail(dataset: &Dataset, id: PartnerId) -> DashboardResult<PartnerDetail> {
    let index = dataset.partner_index();
    let partner = index
        .get(&id)
        .map(|p| (*p).clone())
        .ok_or(DashboardError::UnknownPartner(id))?;

    let hierarchy = dataset.hierarchy();
    let lookup = |pid: PartnerId| index.get(&pid).map(|p| (*p).clone());
    let parent = hierarchy.parent(id).and_then(lookup);
    let children = hierarchy.children(id).into_iter().filter_map(lookup).collect();

    let sales: Vec<&SalesRecord> = dataset.sales.iter().filter(|s| s.partner_id == id).collect();
    let activity: Vec<&ActivityRecord> = dataset.activity.iter().filter(|a| a.partner_id == id).collect();

    let mut counts: BTreeMap<ActivityType, u64> = BTreeMap::new();
    for a in &activity {
        *counts.entry(a.activity_type).or_default() += 1;
    }
    let mut activity_breakdown: Vec<ActivityTypeCount> = counts
        .into_iter()
        .map(|(activity_type, count)| ActivityTypeCount { activity_type, count })
        .collect();
    activity_breakdown.sort_by_key(|c| Reverse(c.count));

    Ok(PartnerDetail {
        revenue_by_date: revenue_by_date(sales.iter().copied()),
        activity_timeline: activity_by_date(activity.iter().copied()),
        social: dataset.social.iter().filter(|s| s.partner_id == id).cloned().collect(),
        partner,
        parent,
        children,
        depth: hierarchy.depth(id).unwrap_or_default(),
        downline: hierarchy.descendants(id).len(),
        recent_transactions: most_recent(&sales),
        activity_breakdown,
        recent_activities: most_recent(&activity),
    })
}
