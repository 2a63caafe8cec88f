//! Partner dimension record

use super::types::{Level, PartnerId, Status};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SENTIMENT_MIN: f64 = -1.0;
pub const SENTIMENT_MAX: f64 = 1.0;
pub const ADVOCACY_MIN: u32 = 1;
pub const ADVOCACY_MAX: u32 = 100;
pub const ENGAGEMENT_MIN: u32 = 1;
pub const ENGAGEMENT_MAX: u32 = 100;

/// A partner in the network hierarchy
///
/// `parent_id` is `None` only for the single root. The social fields are
/// snapshot values carried on the dimension itself; the daily series lives in
/// the social fact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub partner_id: PartnerId,
    pub name: String,
    pub level: Level,
    pub parent_id: Option<PartnerId>,
    pub join_date: NaiveDate,
    pub status: Status,
    pub posts: u32,
    pub shares: u32,
    pub sentiment: f64,
    pub advocacy_score: u32,
    pub engagement: u32,
    pub total_revenue: f64,
}

impl Partner {
    /// Create a partner with zeroed social metrics and neutral scores
    pub fn new(
        partner_id: impl Into<PartnerId>,
        name: impl Into<String>,
        level: Level,
        parent_id: Option<PartnerId>,
        join_date: NaiveDate,
        status: Status,
    ) -> Self {
        Partner {
            partner_id: partner_id.into(),
            name: name.into(),
            level,
            parent_id,
            join_date,
            status,
            posts: 0,
            shares: 0,
            sentiment: 0.0,
            advocacy_score: ADVOCACY_MIN,
            engagement: ENGAGEMENT_MIN,
            total_revenue: 0.0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn with_revenue(mut self, total_revenue: f64) -> Self {
        self.total_revenue = total_revenue;
        self
    }

    /// Case-insensitive name match, or substring match on the decimal id
    pub fn matches_search(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.partner_id.to_string().contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Partner {
        Partner::new(
            12,
            "Partner 12",
            Level::Agent,
            Some(PartnerId(1)),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Status::Active,
        )
    }

    #[test]
    fn test_search_by_name_and_id() {
        let p = sample();
        assert!(p.matches_search("partner"));
        assert!(p.matches_search("PARTNER 1"));
        assert!(p.matches_search("12"));
        assert!(p.matches_search("2"));
        assert!(!p.matches_search("root"));
    }

    #[test]
    fn test_root_detection() {
        let mut p = sample();
        assert!(!p.is_root());
        p.parent_id = None;
        assert!(p.is_root());
    }
}
