//! Filter -> aggregate -> present
//!
//! [`build_view`] recomputes every dashboard panel from a dataset snapshot and
//! the current controls. Panels are independent: a failure in one is recorded
//! in that panel and does not stop the others.

use crate::analytics::{
    apply_filters, compare, headline, leaderboards, level_summary, partner_detail, rankings,
    summarize, time_series, ComparisonProfile, FilterSet, Headline, KpiMetric, Leaderboards,
    LevelSummaryRow, PartnerDetail, Rankings, Summaries, TimeSeries,
};
use crate::config::{DashboardConfig, GraphConfig, RankingConfig};
use crate::dataset::Dataset;
use crate::error::DashboardResult;
use crate::model::{Partner, PartnerId};
use crate::render::charts::{self, ChartSpec};
use crate::render::network::{build_network, NetworkGraph};
use tracing::{debug, warn};

/// State of one dashboard panel
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Ready(T),
    /// Nothing to show for the current filters
    NoData,
    Failed(String),
}

impl<T> Panel<T> {
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Panel::NoData, Panel::Ready)
    }

    pub fn from_result(result: DashboardResult<T>) -> Self {
        match result {
            Ok(value) => Panel::Ready(value),
            Err(e) => {
                warn!("Panel failed: {}", e);
                Panel::Failed(e.to_string())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Panel<U> {
        match self {
            Panel::Ready(value) => Panel::Ready(f(value)),
            Panel::NoData => Panel::NoData,
            Panel::Failed(msg) => Panel::Failed(msg),
        }
    }
}

impl<T> Panel<Vec<T>> {
    /// Empty tables become `NoData`
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Panel::NoData
        } else {
            Panel::Ready(rows)
        }
    }
}

/// Controls that are not filters
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub ranking_metric: KpiMetric,
    pub ranking_k: usize,
    pub leaderboard_k: usize,
    /// Partners for the multi-KPI comparison
    pub compare: Vec<PartnerId>,
    pub max_compare: usize,
    pub graph: GraphConfig,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl ViewOptions {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let RankingConfig { top_k, leaderboard_k, max_compare } = config.ranking;
        ViewOptions {
            ranking_metric: KpiMetric::Revenue,
            ranking_k: top_k,
            leaderboard_k,
            compare: Vec::new(),
            max_compare,
            graph: config.graph.clone(),
        }
    }

    pub fn with_metric(mut self, metric: KpiMetric) -> Self {
        self.ranking_metric = metric;
        self
    }

    pub fn with_compare(mut self, ids: impl IntoIterator<Item = PartnerId>) -> Self {
        self.compare = ids.into_iter().collect();
        self
    }
}

/// Chart panels of the dashboard tabs
#[derive(Debug, Clone, PartialEq)]
pub struct Charts {
    pub revenue_by_level: Panel<ChartSpec>,
    pub activity_by_level: Panel<ChartSpec>,
    pub social_by_level: Panel<ChartSpec>,
    pub advocacy_sentiment_by_level: Panel<ChartSpec>,
    pub revenue_over_time: Panel<ChartSpec>,
    pub activity_over_time: Panel<ChartSpec>,
    pub posts_shares_over_time: Panel<ChartSpec>,
    pub sentiment_over_time: Panel<ChartSpec>,
    pub advocacy_over_time: Panel<ChartSpec>,
    pub ranking: Panel<ChartSpec>,
    pub comparison: Panel<ChartSpec>,
}

/// Everything the dashboard shows for one set of controls
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub filters: FilterSet,
    pub options: ViewOptions,
    /// Partners left after filtering
    pub partner_count: usize,
    /// The filtered partner table
    pub partners: Panel<Vec<Partner>>,
    pub network: Panel<NetworkGraph>,
    pub headline: Panel<Headline>,
    pub summaries: Summaries,
    pub level_summary: Panel<Vec<LevelSummaryRow>>,
    pub time_series: TimeSeries,
    pub rankings: Panel<Rankings>,
    pub leaderboards: Panel<Leaderboards>,
    pub comparison: Panel<Vec<ComparisonProfile>>,
    pub detail: Panel<PartnerDetail>,
    pub charts: Charts,
}

pub fn build_view(dataset: &Dataset, filters: &FilterSet, options: &ViewOptions) -> DashboardView {
    let view = apply_filters(dataset, filters);
    debug!(
        "Filtered to {} partners, {} sales, {} activity, {} social rows",
        view.partners.len(),
        view.sales.len(),
        view.activity.len(),
        view.social.len()
    );

    let network = if view.is_empty() {
        Panel::NoData
    } else {
        Panel::Ready(build_network(&view.partners, &dataset.hierarchy(), filters.selected, &options.graph))
    };

    let has_facts = !(view.sales.is_empty() && view.activity.is_empty() && view.social.is_empty());
    let headline = if has_facts { Panel::Ready(headline(&view)) } else { Panel::NoData };

    let summaries = summarize(&view);
    let levels = level_summary(&view);
    let series = time_series(&view);

    let (rankings, leaderboards) = if summaries.kpi.is_empty() {
        (Panel::NoData, Panel::NoData)
    } else {
        (
            Panel::Ready(rankings(&summaries.kpi, options.ranking_metric, options.ranking_k)),
            Panel::Ready(leaderboards(&summaries.kpi, options.leaderboard_k)),
        )
    };

    let comparison = if options.compare.is_empty() {
        Panel::NoData
    } else {
        match Panel::from_result(compare(&summaries.kpi, &options.compare, options.max_compare)) {
            Panel::Ready(profiles) => Panel::from_rows(profiles),
            other => other,
        }
    };

    let detail = match filters.selected {
        Some(id) => Panel::from_result(partner_detail(dataset, id)),
        None => Panel::NoData,
    };

    let charts = Charts {
        revenue_by_level: Panel::from_option(charts::revenue_by_level(&levels)),
        activity_by_level: Panel::from_option(charts::activity_by_level(&levels)),
        social_by_level: Panel::from_option(charts::social_by_level(&levels)),
        advocacy_sentiment_by_level: Panel::from_option(charts::advocacy_sentiment_by_level(&levels)),
        revenue_over_time: Panel::from_option(charts::revenue_over_time(&series.revenue)),
        activity_over_time: Panel::from_option(charts::activity_over_time(&series.activity)),
        posts_shares_over_time: Panel::from_option(charts::posts_shares_over_time(&series.social)),
        sentiment_over_time: Panel::from_option(charts::sentiment_over_time(&series.social)),
        advocacy_over_time: Panel::from_option(charts::advocacy_over_time(&series.social)),
        ranking: Panel::from_option(rankings.ready().and_then(charts::ranking_bar)),
        comparison: Panel::from_option(comparison.ready().and_then(|p| charts::comparison_radar(p))),
    };

    DashboardView {
        filters: filters.clone(),
        options: options.clone(),
        partner_count: view.partners.len(),
        partners: Panel::from_rows(view.partners.iter().map(|p| (*p).clone()).collect()),
        network,
        headline,
        summaries,
        level_summary: Panel::from_rows(levels),
        time_series: series,
        rankings,
        leaderboards,
        comparison,
        detail,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::generator::{generate_dataset, session_rng};
    use crate::model::Level;
    use chrono::NaiveDate;

    fn dataset() -> Dataset {
        let config = GeneratorConfig {
            partner_count: 15,
            anchor_date: NaiveDate::from_ymd_opt(2025, 1, 31),
            seed: Some(21),
            ..GeneratorConfig::default()
        };
        generate_dataset(&mut session_rng(config.seed), &config)
    }

    #[test]
    fn test_default_view_is_populated() {
        let ds = dataset();
        let view = build_view(&ds, &FilterSet::default(), &ViewOptions::default());
        assert_eq!(view.partner_count, 15);
        assert_eq!(view.partners.ready().map(Vec::len), Some(15));
        assert!(view.network.is_ready());
        assert!(view.charts.advocacy_sentiment_by_level.is_ready());
        assert!(view.headline.is_ready());
        assert!(view.charts.sentiment_over_time.is_ready());
        assert_eq!(view.summaries.kpi.len(), 15);
        assert_eq!(view.rankings.ready().unwrap().top.len(), 10);
        assert_eq!(view.comparison, Panel::NoData);
        assert_eq!(view.detail, Panel::NoData);
    }

    #[test]
    fn test_empty_filters_give_no_data() {
        let ds = dataset();
        let filters = FilterSet::default().with_levels(Vec::<Level>::new());
        let view = build_view(&ds, &filters, &ViewOptions::default());
        assert_eq!(view.partner_count, 0);
        assert_eq!(view.partners, Panel::NoData);
        assert_eq!(view.network, Panel::NoData);
        assert_eq!(view.headline, Panel::NoData);
        assert_eq!(view.rankings, Panel::NoData);
        assert_eq!(view.charts.revenue_by_level, Panel::NoData);
        assert!(view.summaries.kpi.is_empty());
    }

    #[test]
    fn test_failed_panel_does_not_block_others() {
        let ds = dataset();
        let options = ViewOptions::default().with_compare((1..=6).map(PartnerId));
        let filters = FilterSet::default().with_selected(Some(PartnerId(999)));
        let view = build_view(&ds, &filters, &options);
        assert!(matches!(view.comparison, Panel::Failed(_)));
        assert!(matches!(view.detail, Panel::Failed(_)));
        assert!(view.network.is_ready());
    }

    #[test]
    fn test_selection_narrows_facts() {
        let ds = dataset();
        let filters = FilterSet::default().with_selected(Some(PartnerId(1)));
        let view = build_view(&ds, &filters, &ViewOptions::default());
        assert_eq!(view.partner_count, 15);
        assert!(view.summaries.kpi.iter().all(|r| r.partner_id == PartnerId(1)));
        assert!(view.detail.is_ready());
        let graph = view.network.ready().unwrap();
        assert_eq!(graph.node(PartnerId(1)).unwrap().border_width, 3);
    }
}
