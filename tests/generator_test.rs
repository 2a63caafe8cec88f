use chrono::NaiveDate;
use partnernet::config::GeneratorConfig;
use partnernet::generator::{generate_dataset, generate_partners, session_rng};
use partnernet::hierarchy::{validate_generation_order, HierarchyView};
use partnernet::{Level, PartnerId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()
}

#[test]
fn test_generated_trees_are_single_rooted() {
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let partners = generate_partners(&mut rng, 30, anchor());
        assert_eq!(partners.len(), 30);
        validate_generation_order(&partners).unwrap();

        let roots: Vec<_> = partners.iter().filter(|p| p.is_root()).collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].partner_id, PartnerId(1));
        assert_eq!(roots[0].level, Level::Distributor);
    }
}

#[test]
fn test_every_partner_reachable_from_root() {
    let mut rng = StdRng::seed_from_u64(99);
    let partners = generate_partners(&mut rng, 60, anchor());
    let view = HierarchyView::build(&partners);

    let mut reached: HashSet<PartnerId> = view.descendants(PartnerId(1)).into_iter().collect();
    reached.insert(PartnerId(1));
    assert_eq!(reached.len(), partners.len());
    for p in &partners {
        assert!(view.depth(p.partner_id).is_some());
    }
}

#[test]
fn test_facts_reference_known_partners_and_windows() {
    let config = GeneratorConfig {
        partner_count: 20,
        anchor_date: Some(anchor()),
        seed: Some(8),
        ..GeneratorConfig::default()
    };
    let ds = generate_dataset(&mut session_rng(config.seed), &config);
    let ids: HashSet<PartnerId> = ds.partners.iter().map(|p| p.partner_id).collect();

    let earliest = anchor() - chrono::Duration::days(90);
    for s in &ds.sales {
        assert!(ids.contains(&s.partner_id));
        assert!(s.date >= earliest && s.date <= anchor());
        assert!((100.0..=2000.0).contains(&s.revenue));
    }
    for a in &ds.activity {
        assert!(ids.contains(&a.partner_id));
        assert_eq!(a.duration_minutes.is_some(), a.activity_type.has_duration());
    }
    assert_eq!(ds.social.len(), 20 * 90);
    for s in &ds.social {
        assert!((-1.0..=1.0).contains(&s.sentiment));
        assert!((1..=100).contains(&s.advocacy_score));
        assert!(s.reviews <= 1);
    }
}

#[test]
fn test_same_seed_same_dataset() {
    let config = GeneratorConfig {
        partner_count: 10,
        anchor_date: Some(anchor()),
        seed: Some(1234),
        ..GeneratorConfig::default()
    };
    let a = generate_dataset(&mut session_rng(config.seed), &config);
    let b = generate_dataset(&mut session_rng(config.seed), &config);
    assert_eq!(a.partners, b.partners);
    assert_eq!(a.activity, b.activity);
    assert_eq!(a.social, b.social);
}
