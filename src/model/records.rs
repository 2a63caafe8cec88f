//! Fact tables: sales, activity and social engagement
//!
//! Records are append-only and immutable once generated.

use super::types::{ActivityType, PartnerId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One revenue transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub partner_id: PartnerId,
    pub date: NaiveDate,
    pub revenue: f64,
    pub transaction_id: String,
    pub product: String,
}

/// One engagement event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub partner_id: PartnerId,
    pub date: NaiveDate,
    pub activity_type: ActivityType,
    /// Present only for activity types with a duration
    pub duration_minutes: Option<u32>,
}

/// Daily social and digital engagement for one partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialRecord {
    pub partner_id: PartnerId,
    pub date: NaiveDate,
    pub posts: u32,
    pub shares: u32,
    pub sentiment: f64,
    pub advocacy_score: u32,
    pub reviews: u32,
}

/// Uniform access to the keys every fact table shares
pub trait FactRecord {
    fn partner_id(&self) -> PartnerId;
    fn date(&self) -> NaiveDate;
}

impl FactRecord for SalesRecord {
    fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl FactRecord for ActivityRecord {
    fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl FactRecord for SocialRecord {
    fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}
