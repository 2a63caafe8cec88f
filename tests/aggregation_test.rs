use chrono::NaiveDate;
use partnernet::analytics::{apply_filters, level_summary, rank, summarize, KpiMetric, SortOrder};
use partnernet::config::GeneratorConfig;
use partnernet::dataset::{Dataset, Origin};
use partnernet::generator::{generate_dataset, session_rng};
use partnernet::{FilterSet, Level, Partner, PartnerId, SalesRecord, Status};

fn generated(partner_count: usize, seed: u64) -> Dataset {
    let config = GeneratorConfig {
        partner_count,
        anchor_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        seed: Some(seed),
        ..GeneratorConfig::default()
    };
    generate_dataset(&mut session_rng(config.seed), &config)
}

#[test]
fn test_ambassador_filter_keeps_only_ambassadors() {
    for seed in 0..20 {
        let ds = generated(5, seed);
        let filters = FilterSet::default().with_levels([Level::Ambassador]);
        let summaries = summarize(&apply_filters(&ds, &filters));

        let ambassadors = ds.partners.iter().filter(|p| p.level == Level::Ambassador).count();
        assert_eq!(summaries.kpi.len(), ambassadors);
        assert!(summaries.kpi.iter().all(|r| r.level == Level::Ambassador));
    }
}

#[test]
fn test_empty_filter_sets_give_empty_tables() {
    let ds = generated(25, 4);
    for filters in [
        FilterSet::default().with_levels(Vec::<Level>::new()),
        FilterSet::default().with_statuses(Vec::<Status>::new()),
        FilterSet::default().with_search("no partner is called this"),
    ] {
        let view = apply_filters(&ds, &filters);
        let summaries = summarize(&view);
        assert!(summaries.revenue.is_empty());
        assert!(summaries.activity.is_empty());
        assert!(summaries.social.is_empty());
        assert!(summaries.kpi.is_empty());
        assert!(level_summary(&view).is_empty());
    }
}

#[test]
fn test_revenue_is_conserved() {
    let ds = generated(40, 17);
    let view = apply_filters(&ds, &FilterSet::default());
    let summaries = summarize(&view);

    let raw: f64 = ds.sales.iter().map(|s| s.revenue).sum();
    let per_partner: f64 = summaries.revenue.iter().map(|r| r.revenue).sum();
    let per_level: f64 = level_summary(&view).iter().map(|r| r.revenue).sum();
    assert!((raw - per_partner).abs() < 1e-6);
    assert!((raw - per_level).abs() < 1e-6);
}

#[test]
fn test_ranking_descending_and_truncated() {
    let ds = generated(30, 2);
    let summaries = summarize(&apply_filters(&ds, &FilterSet::default()));
    for metric in KpiMetric::ALL {
        let top = rank(&summaries.kpi, metric, SortOrder::Descending, 10);
        assert_eq!(top.len(), 10.min(summaries.kpi.len()));
        for pair in top.windows(2) {
            assert!(metric.value(&pair[0]) >= metric.value(&pair[1]));
        }
        let bottom = rank(&summaries.kpi, metric, SortOrder::Ascending, 5);
        for pair in bottom.windows(2) {
            assert!(metric.value(&pair[0]) <= metric.value(&pair[1]));
        }
    }
}

#[test]
fn test_two_partner_sales_scenario() {
    let day = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
    let sale = |id: u64, revenue: f64| SalesRecord {
        partner_id: PartnerId(id),
        date: day,
        revenue,
        transaction_id: format!("TX-{}", 10_000 + id),
        product: "Product-1".to_string(),
    };
    let ds = Dataset {
        origin: Origin::Generated,
        partners: vec![
            Partner::new(1, "Root Distributor", Level::Distributor, None, day, Status::Active),
            Partner::new(2, "Partner 2", Level::Agent, Some(PartnerId(1)), day, Status::Active),
        ],
        sales: vec![sale(1, 100.0), sale(1, 250.5), sale(2, 75.0)],
        activity: Vec::new(),
        social: Vec::new(),
    };

    let view = apply_filters(&ds, &FilterSet::default());
    let summaries = summarize(&view);
    assert_eq!(summaries.revenue[0].revenue, 350.5);
    assert_eq!(summaries.revenue[1].revenue, 75.0);

    let levels = level_summary(&view);
    let distributor = levels.iter().find(|r| r.level == Level::Distributor).unwrap();
    assert_eq!(distributor.revenue, 350.5);
    assert_eq!(summaries.kpi[1].activity_count, 0);
}

#[test]
fn test_search_matches_name_or_id() {
    let ds = generated(15, 6);
    let view = apply_filters(&ds, &FilterSet::default().with_search("root"));
    assert_eq!(view.partners.len(), 1);
    assert_eq!(view.partners[0].partner_id, PartnerId(1));

    let view = apply_filters(&ds, &FilterSet::default().with_search("12"));
    assert!(view.partners.iter().any(|p| p.partner_id == PartnerId(12)));
}
