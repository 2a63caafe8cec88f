//! Partner network data model
//!
//! Typed records for the partner dimension and the three fact tables:
//! - Partner hierarchy (distributors, agents, ambassadors)
//! - Sales transactions
//! - Engagement activity
//! - Daily social/digital KPIs

pub mod partner;
pub mod records;
pub mod types;

pub use partner::{
    Partner, ADVOCACY_MAX, ADVOCACY_MIN, ENGAGEMENT_MAX, ENGAGEMENT_MIN, SENTIMENT_MAX, SENTIMENT_MIN,
};
pub use records::{ActivityRecord, FactRecord, SalesRecord, SocialRecord};
pub use types::{ActivityType, Level, ParseEnumError, PartnerId, Status};
