//! Synthetic data generator
//!
//! Produces a partner tree and the three fact tables consistent with it.
//! Randomness is injected so tests can pass a seeded RNG; sessions without a
//! configured seed draw from OS entropy and are not reproducible.

pub mod facts;
pub mod partners;

pub use facts::{generate_activity, generate_sales, generate_social, REVIEW_PROBABILITY};
pub use partners::{draw_level, generate_partners, LEVEL_WEIGHTS, ROOT_NAME};

use crate::config::GeneratorConfig;
use crate::dataset::{Dataset, Origin};
use crate::model::Partner;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// RNG for one session: seeded when configured, entropy otherwise
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a complete dataset: partner tree plus sales, activity and social
pub fn generate_dataset<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> Dataset {
    let anchor = config.anchor();
    let partners = generate_partners(rng, config.partner_count, anchor);
    synthesize_facts(rng, partners, config, Origin::Generated)
}

/// Generate fact tables for an existing partner table
pub fn synthesize_facts<R: Rng + ?Sized>(
    rng: &mut R,
    partners: Vec<Partner>,
    config: &GeneratorConfig,
    origin: Origin,
) -> Dataset {
    let anchor = config.anchor();
    let sales = generate_sales(rng, &partners, config.sales_days, anchor);
    let activity = generate_activity(rng, &partners, config.activity_days, anchor);
    let social = generate_social(rng, &partners, config.social_days, anchor);

    debug!(
        "Synthesized {} sales, {} activity and {} social records for {} partners",
        sales.len(),
        activity.len(),
        social.len(),
        partners.len()
    );

    Dataset {
        origin,
        partners,
        sales,
        activity,
        social,
    }
}
