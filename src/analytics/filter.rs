//! Partner filtering and fact-table cascade

use crate::dataset::Dataset;
use crate::model::{ActivityRecord, FactRecord, Level, Partner, PartnerId, SalesRecord, SocialRecord, Status};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Active filter controls
///
/// An empty level or status set selects nothing. `search` is ignored while a
/// partner is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub levels: BTreeSet<Level>,
    pub statuses: BTreeSet<Status>,
    pub search: Option<String>,
    pub selected: Option<PartnerId>,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            levels: Level::ALL.into_iter().collect(),
            statuses: Status::ALL.into_iter().collect(),
            search: None,
            selected: None,
        }
    }
}

impl FilterSet {
    pub fn with_levels(mut self, levels: impl IntoIterator<Item = Level>) -> Self {
        self.levels = levels.into_iter().collect();
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search = if query.trim().is_empty() { None } else { Some(query) };
        self
    }

    pub fn with_selected(mut self, id: Option<PartnerId>) -> Self {
        self.selected = id;
        self
    }

    fn admits(&self, partner: &Partner) -> bool {
        self.levels.contains(&partner.level) && self.statuses.contains(&partner.status)
    }

    fn search_query(&self) -> Option<&str> {
        match (&self.search, self.selected) {
            (Some(q), None) => Some(q.as_str()),
            _ => None,
        }
    }
}

/// Partners and facts that survived the filters
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    /// Partners passing level, status and search filters. A selection does
    /// not narrow this list so the graph can still show the neighbourhood.
    pub partners: Vec<&'a Partner>,
    pub sales: Vec<&'a SalesRecord>,
    pub activity: Vec<&'a ActivityRecord>,
    pub social: Vec<&'a SocialRecord>,
    pub selected: Option<PartnerId>,
}

impl<'a> FilteredView<'a> {
    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    pub fn partner_ids(&self) -> FxHashSet<PartnerId> {
        self.partners.iter().map(|p| p.partner_id).collect()
    }
}

/// Restrict partners by level, status and search, then inner-join every fact
/// table on the surviving partner ids (further narrowed to the selected
/// partner, when there is one).
pub fn apply_filters<'a>(dataset: &'a Dataset, filters: &FilterSet) -> FilteredView<'a> {
    let query = filters.search_query();
    let partners: Vec<&Partner> = dataset
        .partners
        .iter()
        .filter(|p| filters.admits(p))
        .filter(|p| query.map_or(true, |q| p.matches_search(q)))
        .collect();

    let mut keep: FxHashSet<PartnerId> = partners.iter().map(|p| p.partner_id).collect();
    if let Some(selected) = filters.selected {
        keep.retain(|id| *id == selected);
    }

    FilteredView {
        partners,
        sales: join(&dataset.sales, &keep),
        activity: join(&dataset.activity, &keep),
        social: join(&dataset.social, &keep),
        selected: filters.selected,
    }
}

/// Inner join of a fact table on a set of partner ids
fn join<'a, T: FactRecord>(rows: &'a [T], keep: &FxHashSet<PartnerId>) -> Vec<&'a T> {
    rows.iter().filter(|r| keep.contains(&r.partner_id())).collect()
}

/// Partners offered by the partner selector: level and status filtered, then
/// narrowed by a case-insensitive name search.
pub fn selectable_partners<'a>(dataset: &'a Dataset, filters: &FilterSet) -> Vec<&'a Partner> {
    let needle = filters.search.as_deref().map(str::to_lowercase);
    dataset
        .partners
        .iter()
        .filter(|p| filters.admits(p))
        .filter(|p| needle.as_ref().map_or(true, |n| p.name.to_lowercase().contains(n.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Origin;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn dataset() -> Dataset {
        let partners = vec![
            Partner::new(1, "Root Distributor", Level::Distributor, None, date(), Status::Active),
            Partner::new(2, "Partner 2", Level::Agent, Some(PartnerId(1)), date(), Status::Pending),
            Partner::new(3, "Partner 3", Level::Ambassador, Some(PartnerId(2)), date(), Status::Active),
            Partner::new(12, "Partner 12", Level::Ambassador, Some(PartnerId(2)), date(), Status::Premium),
        ];
        let sales = partners
            .iter()
            .map(|p| SalesRecord {
                partner_id: p.partner_id,
                date: date(),
                revenue: 100.0,
                transaction_id: "TX-10000".to_string(),
                product: "Product-1".to_string(),
            })
            .collect();
        Dataset {
            origin: Origin::Generated,
            partners,
            sales,
            activity: Vec::new(),
            social: Vec::new(),
        }
    }

    fn ids(view: &FilteredView) -> Vec<u64> {
        view.partners.iter().map(|p| p.partner_id.as_u64()).collect()
    }

    #[test]
    fn test_default_keeps_everything() {
        let ds = dataset();
        let view = apply_filters(&ds, &FilterSet::default());
        assert_eq!(ids(&view), vec![1, 2, 3, 12]);
        assert_eq!(view.sales.len(), 4);
    }

    #[test]
    fn test_level_and_status_filters() {
        let ds = dataset();
        let filters = FilterSet::default()
            .with_levels([Level::Ambassador])
            .with_statuses([Status::Active, Status::Premium]);
        let view = apply_filters(&ds, &filters);
        assert_eq!(ids(&view), vec![3, 12]);
        assert!(view.sales.iter().all(|s| s.partner_id == PartnerId(3) || s.partner_id == PartnerId(12)));
    }

    #[test]
    fn test_empty_selection_selects_nothing() {
        let ds = dataset();
        let view = apply_filters(&ds, &FilterSet::default().with_levels(Vec::<Level>::new()));
        assert!(view.is_empty());
        assert!(view.sales.is_empty());
    }

    #[test]
    fn test_search_by_name_or_id() {
        let ds = dataset();
        let view = apply_filters(&ds, &FilterSet::default().with_search("ROOT"));
        assert_eq!(ids(&view), vec![1]);

        let view = apply_filters(&ds, &FilterSet::default().with_search("2"));
        assert_eq!(ids(&view), vec![2, 12]);
    }

    #[test]
    fn test_selection_narrows_facts_only() {
        let ds = dataset();
        let filters = FilterSet::default()
            .with_search("nomatch")
            .with_selected(Some(PartnerId(3)));
        let view = apply_filters(&ds, &filters);
        // search is ignored while a partner is selected
        assert_eq!(ids(&view), vec![1, 2, 3, 12]);
        assert_eq!(view.sales.len(), 1);
        assert_eq!(view.sales[0].partner_id, PartnerId(3));
    }

    #[test]
    fn test_selectable_partners_search_by_name() {
        let ds = dataset();
        let filters = FilterSet::default().with_search("partner 1");
        let names: Vec<_> = selectable_partners(&ds, &filters).iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Partner 12".to_string()]);
    }
}
