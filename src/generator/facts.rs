//! Fact table synthesis: sales, activity and daily social metrics

use super::partners::round2;
use crate::model::{
    ActivityRecord, ActivityType, Partner, SalesRecord, SocialRecord, ADVOCACY_MAX, ADVOCACY_MIN,
    SENTIMENT_MAX, SENTIMENT_MIN,
};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, Poisson};

/// Probability that a partner receives a review on a given day
pub const REVIEW_PROBABILITY: f64 = 0.1;

/// Between 10 and 60 transactions per partner, dated within `days` of the anchor
pub fn generate_sales<R: Rng + ?Sized>(
    rng: &mut R,
    partners: &[Partner],
    days: u32,
    anchor: NaiveDate,
) -> Vec<SalesRecord> {
    let mut sales = Vec::new();
    for p in partners {
        let transactions = rng.gen_range(10..=60);
        for _ in 0..transactions {
            sales.push(SalesRecord {
                partner_id: p.partner_id,
                date: anchor - Duration::days(rng.gen_range(0..=days as i64)),
                revenue: round2(rng.gen_range(100.0..=2000.0)),
                transaction_id: format!("TX-{}", rng.gen_range(10_000..=99_999)),
                product: format!("Product-{}", rng.gen_range(1..=10)),
            });
        }
    }
    sales
}

/// Between 20 and 100 activity events per partner. Only calls, meetings and
/// trainings get a duration.
pub fn generate_activity<R: Rng + ?Sized>(
    rng: &mut R,
    partners: &[Partner],
    days: u32,
    anchor: NaiveDate,
) -> Vec<ActivityRecord> {
    let mut activity = Vec::new();
    for p in partners {
        let events = rng.gen_range(20..=100);
        for _ in 0..events {
            let date = anchor - Duration::days(rng.gen_range(0..=days as i64));
            let activity_type = ActivityType::ALL[rng.gen_range(0..ActivityType::ALL.len())];
            let duration_minutes = activity_type
                .has_duration()
                .then(|| rng.gen_range(5..=120));
            activity.push(ActivityRecord {
                partner_id: p.partner_id,
                date,
                activity_type,
                duration_minutes,
            });
        }
    }
    activity
}

/// One record per partner per day for the `days` days before the anchor.
///
/// Each partner gets a base posting/sharing rate, a slow sentiment trend and a
/// base advocacy score. Daily posts and shares are Poisson around the base,
/// sentiment drifts from the partner's snapshot value and advocacy jitters by
/// at most two points.
pub fn generate_social<R: Rng + ?Sized>(
    rng: &mut R,
    partners: &[Partner],
    days: u32,
    anchor: NaiveDate,
) -> Vec<SocialRecord> {
    let mut social = Vec::with_capacity(partners.len() * days as usize);
    for p in partners {
        let base_posts = rng.gen_range(0..=3u32) as f64;
        let base_shares = rng.gen_range(0..=5u32) as f64;
        let sentiment_trend = rng.gen_range(-0.01..=0.01);
        let base_advocacy: i64 = rng.gen_range(30..=80);

        for day in 0..days {
            let date = anchor - Duration::days((days - day) as i64);
            let posts = poisson(rng, base_posts);
            let shares = poisson(rng, base_shares);

            let drift = sentiment_trend * day as f64 / 10.0 + rng.gen_range(-0.1..=0.1);
            let sentiment = round2((p.sentiment + drift).clamp(SENTIMENT_MIN, SENTIMENT_MAX));

            let advocacy_score = (base_advocacy + rng.gen_range(-2..=2))
                .clamp(ADVOCACY_MIN as i64, ADVOCACY_MAX as i64) as u32;

            let reviews = u32::from(rng.gen_bool(REVIEW_PROBABILITY));

            social.push(SocialRecord {
                partner_id: p.partner_id,
                date,
                posts,
                shares,
                sentiment,
                advocacy_score,
                reviews,
            });
        }
    }
    social
}

/// Poisson draw; a zero rate always yields zero
fn poisson<R: Rng + ?Sized>(rng: &mut R, lambda: f64) -> u32 {
    match Poisson::new(lambda) {
        Ok(dist) => {
            let draw: f64 = dist.sample(rng);
            draw as u32
        }
        Err(_) => 0,
    }
}
