//! Aggregation layer
//!
//! Pure functions over a [`Dataset`](crate::dataset::Dataset). Every
//! operation is deterministic for the same inputs and yields an empty result,
//! never an error, when the filters leave nothing behind.
//!
//! Implements:
//! - Level, status, search and selection filters with fact-table cascade
//! - Per-partner revenue, activity, social and merged KPI summaries
//! - Per-level summary and headline totals
//! - Daily time series
//! - Rankings, leaderboards and multi-partner comparison
//! - Single-partner drill-down

pub mod aggregate;
pub mod compare;
pub mod detail;
pub mod filter;
pub mod ranking;
pub mod summary;
pub mod timeseries;

pub use aggregate::{AggregateType, GroupedAggregate};
pub use compare::{compare, ComparisonProfile, COMPARISON_METRICS};
pub use detail::{partner_detail, ActivityTypeCount, PartnerDetail, RECENT_ROWS};
pub use filter::{apply_filters, selectable_partners, FilterSet, FilteredView};
pub use ranking::{leaderboards, rank, rankings, KpiMetric, Leaderboards, Rankings, SortOrder};
pub use summary::{
    activity_summary, headline, kpi_summary, level_summary, revenue_summary, social_summary,
    summarize, ActivitySummaryRow, Headline, KpiRow, LevelSummaryRow, RevenueSummaryRow,
    SocialSummaryRow, Summaries,
};
pub use timeseries::{
    activity_by_date, revenue_by_date, social_by_date, time_series, ActivityPoint, RevenuePoint,
    SocialPoint, TimeSeries,
};
