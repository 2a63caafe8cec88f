//! Partner hierarchy synthesis

use crate::model::{
    Level, Partner, PartnerId, Status, ENGAGEMENT_MAX, ENGAGEMENT_MIN, SENTIMENT_MAX, SENTIMENT_MIN,
};
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;

/// Probability of each level for non-root partners, in `Level::ALL` order
pub const LEVEL_WEIGHTS: [f64; 3] = [0.2, 0.5, 0.3];

pub const ROOT_NAME: &str = "Root Distributor";

/// Generate `count` partners forming a single-rooted tree.
///
/// Partner 1 is the root distributor. Every later partner draws a weighted
/// level and attaches to a uniformly chosen existing partner of strictly
/// higher rank, falling back to the root when no such partner exists. Parents
/// therefore always precede their children.
pub fn generate_partners<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    anchor: NaiveDate,
) -> Vec<Partner> {
    let mut partners: Vec<Partner> = Vec::with_capacity(count);
    if count == 0 {
        return partners;
    }

    partners.push(Partner {
        partner_id: PartnerId(1),
        name: ROOT_NAME.to_string(),
        level: Level::Distributor,
        parent_id: None,
        join_date: anchor - Duration::days(rng.gen_range(100..=1000)),
        status: random_status(rng),
        posts: rng.gen_range(10..=200),
        shares: rng.gen_range(20..=500),
        sentiment: round2(rng.gen_range(SENTIMENT_MIN..=SENTIMENT_MAX)),
        advocacy_score: rng.gen_range(1..=100),
        engagement: rng.gen_range(ENGAGEMENT_MIN..=ENGAGEMENT_MAX),
        total_revenue: round2(rng.gen_range(10_000.0..=100_000.0)),
    });

    for i in 2..=count as u64 {
        let level = draw_level(rng);
        let parent_id = partners
            .iter()
            .filter(|p| p.level.outranks(level))
            .collect::<Vec<_>>()
            .choose(rng)
            .map(|p| p.partner_id)
            .unwrap_or(PartnerId(1));

        partners.push(Partner {
            partner_id: PartnerId(i),
            name: format!("Partner {}", i),
            level,
            parent_id: Some(parent_id),
            join_date: anchor - Duration::days(rng.gen_range(1..=900)),
            status: random_status(rng),
            posts: rng.gen_range(0..=200),
            shares: rng.gen_range(0..=500),
            sentiment: round2(rng.gen_range(SENTIMENT_MIN..=SENTIMENT_MAX)),
            advocacy_score: rng.gen_range(1..=100),
            engagement: rng.gen_range(ENGAGEMENT_MIN..=ENGAGEMENT_MAX),
            total_revenue: round2(rng.gen_range(1_000.0..=50_000.0)),
        });
    }

    partners
}

/// Weighted level draw over [`LEVEL_WEIGHTS`]
pub fn draw_level<R: Rng + ?Sized>(rng: &mut R) -> Level {
    let total: f64 = LEVEL_WEIGHTS.iter().sum();
    let mut roll = rng.gen_range(0.0..total);
    for (level, weight) in Level::ALL.iter().zip(LEVEL_WEIGHTS) {
        if roll < weight {
            return *level;
        }
        roll -= weight;
    }
    Level::Ambassador
}

fn random_status<R: Rng + ?Sized>(rng: &mut R) -> Status {
    Status::ALL[rng.gen_range(0..Status::ALL.len())]
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
