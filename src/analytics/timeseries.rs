//! Calendar-date time series
//!
//! One row per date present in the filtered data. Dates without records are
//! absent rather than zero-filled.

use super::aggregate::{AggregateType, GroupedAggregate};
use super::filter::FilteredView;
use crate::model::{ActivityRecord, SalesRecord, SocialRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub activity_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPoint {
    pub date: NaiveDate,
    pub posts: u64,
    pub shares: u64,
    pub sentiment: f64,
    pub advocacy_score: f64,
    pub reviews: u64,
}

/// Revenue, activity and social series for one filtered view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub revenue: Vec<RevenuePoint>,
    pub activity: Vec<ActivityPoint>,
    pub social: Vec<SocialPoint>,
}

pub fn revenue_by_date<'a>(sales: impl IntoIterator<Item = &'a SalesRecord>) -> Vec<RevenuePoint> {
    let mut agg = GroupedAggregate::new(&[AggregateType::Sum]);
    for s in sales {
        agg.update(s.date, &[s.revenue]);
    }
    agg.finish()
        .into_iter()
        .map(|(date, v)| RevenuePoint { date, revenue: v[0] })
        .collect()
}

pub fn activity_by_date<'a>(
    activity: impl IntoIterator<Item = &'a ActivityRecord>,
) -> Vec<ActivityPoint> {
    let mut agg = GroupedAggregate::new(&[AggregateType::Count]);
    for a in activity {
        agg.update(a.date, &[]);
    }
    agg.finish()
        .into_iter()
        .map(|(date, v)| ActivityPoint { date, activity_count: v[0] as u64 })
        .collect()
}

pub fn social_by_date<'a>(social: impl IntoIterator<Item = &'a SocialRecord>) -> Vec<SocialPoint> {
    let mut agg = GroupedAggregate::new(&[
        AggregateType::Sum,
        AggregateType::Sum,
        AggregateType::Avg,
        AggregateType::Avg,
        AggregateType::Sum,
    ]);
    for s in social {
        agg.update(
            s.date,
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
        .map(|(date, v)| SocialPoint {
            date,
            posts: v[0] as u64,
            shares: v[1] as u64,
            sentiment: v[2],
            advocacy_score: v[3],
            reviews: v[4] as u64,
        })
        .collect()
}

pub fn time_series(view: &FilteredView) -> TimeSeries {
    TimeSeries {
        revenue: revenue_by_date(view.sales.iter().copied()),
        activity: activity_by_date(view.activity.iter().copied()),
        social: social_by_date(view.social.iter().copied()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActivityType, PartnerId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_revenue_grouped_and_sorted() {
        let sales: Vec<SalesRecord> = [(5, 10.0), (2, 1.0), (5, 2.5)]
            .into_iter()
            .map(|(d, revenue)| SalesRecord {
                partner_id: PartnerId(1),
                date: day(d),
                revenue,
                transaction_id: "TX-10001".to_string(),
                product: "Product-1".to_string(),
            })
            .collect();
        let points = revenue_by_date(&sales);
        assert_eq!(
            points,
            vec![
                RevenuePoint { date: day(2), revenue: 1.0 },
                RevenuePoint { date: day(5), revenue: 12.5 },
            ]
        );
    }

    #[test]
    fn test_missing_dates_are_absent() {
        let activity: Vec<ActivityRecord> = [1, 1, 4]
            .into_iter()
            .map(|d| ActivityRecord {
                partner_id: PartnerId(2),
                date: day(d),
                activity_type: ActivityType::Meeting,
                duration_minutes: Some(15),
            })
            .collect();
        let points = activity_by_date(&activity);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].activity_count, 2);
        assert_eq!(points[1].date, day(4));
    }

    #[test]
    fn test_social_mean_per_date() {
        let social = vec![
            SocialRecord { partner_id: PartnerId(1), date: day(1), posts: 1, shares: 2, sentiment: 0.4, advocacy_score: 50, reviews: 0 },
            SocialRecord { partner_id: PartnerId(2), date: day(1), posts: 3, shares: 0, sentiment: -0.2, advocacy_score: 60, reviews: 1 },
        ];
        let points = social_by_date(&social);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].posts, 4);
        assert!((points[0].sentiment - 0.1).abs() < 1e-9);
        assert_eq!(points[0].advocacy_score, 55.0);
        assert_eq!(points[0].reviews, 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(revenue_by_date(&Vec::<SalesRecord>::new()).is_empty());
        assert!(social_by_date(std::iter::empty::<&SocialRecord>()).is_empty());
    }
}
