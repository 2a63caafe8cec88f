//! Core type definitions for the partner network

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PartnerId(pub u64);

impl PartnerId {
    pub fn new(id: u64) -> Self {
        PartnerId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PartnerId {
    fn from(id: u64) -> Self {
        PartnerId(id)
    }
}

/// Returned when a textual enum value is not one of the known variants
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Partner tier. Declaration order is hierarchy rank: a lower index is a
/// higher-ranked tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Level {
    Distributor,
    Agent,
    Ambassador,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Distributor, Level::Agent, Level::Ambassador];

    /// Position in the ranking Distributor < Agent < Ambassador
    pub fn rank(&self) -> usize {
        match self {
            Level::Distributor => 0,
            Level::Agent => 1,
            Level::Ambassador => 2,
        }
    }

    /// True when `self` may act as a parent of a `child` level node
    pub fn outranks(&self, child: Level) -> bool {
        self.rank() < child.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Distributor => "Distributor",
            Level::Agent => "Agent",
            Level::Ambassador => "Ambassador",
        }
    }

    /// Fixed palette used by every chart and the network graph
    pub fn color(&self) -> &'static str {
        match self {
            Level::Distributor => "#1f77b4",
            Level::Agent => "#2ca02c",
            Level::Ambassador => "#d62728",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError { kind: "level", value: s.to_string() })
    }
}

/// Partner account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Status {
    Active,
    Pending,
    Inactive,
    Premium,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Active, Status::Pending, Status::Inactive, Status::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Pending => "Pending",
            Status::Inactive => "Inactive",
            Status::Premium => "Premium",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .iter()
            .copied()
            .find(|st| st.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError { kind: "status", value: s.to_string() })
    }
}

/// Kind of engagement recorded in the activity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum ActivityType {
    Login,
    Call,
    Meeting,
    Demo,
    Training,
    Review,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::Login,
        ActivityType::Call,
        ActivityType::Meeting,
        ActivityType::Demo,
        ActivityType::Training,
        ActivityType::Review,
    ];

    /// Only calls, meetings and trainings carry a duration
    pub fn has_duration(&self) -> bool {
        matches!(self, ActivityType::Call | ActivityType::Meeting | ActivityType::Training)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Login => "Login",
            ActivityType::Call => "Call",
            ActivityType::Meeting => "Meeting",
            ActivityType::Demo => "Demo",
            ActivityType::Training => "Training",
            ActivityType::Review => "Review",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError { kind: "activity type", value: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_id() {
        let id = PartnerId::new(42);
        assert_eq!(id.as_u64(), 42);
        assert_eq!(format!("{}", id), "42");

        let id2: PartnerId = 100.into();
        assert_eq!(id2.as_u64(), 100);
        assert!(id < id2);
    }

    #[test]
    fn test_level_ranking() {
        assert!(Level::Distributor.outranks(Level::Agent));
        assert!(Level::Agent.outranks(Level::Ambassador));
        assert!(!Level::Ambassador.outranks(Level::Ambassador));
        assert!(!Level::Agent.outranks(Level::Distributor));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ambassador".parse::<Level>().unwrap(), Level::Ambassador);
        assert_eq!(" PREMIUM ".parse::<Status>().unwrap(), Status::Premium);
        assert_eq!("training".parse::<ActivityType>().unwrap(), ActivityType::Training);

        let err = "Reseller".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "unknown level 'Reseller'");
    }

    #[test]
    fn test_duration_types() {
        let with: Vec<_> = ActivityType::ALL.iter().filter(|a| a.has_duration()).collect();
        assert_eq!(with, vec![&ActivityType::Call, &ActivityType::Meeting, &ActivityType::Training]);
    }

    #[test]
    fn test_serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Level::Agent).unwrap(), "\"Agent\"");
        assert_eq!(serde_json::to_string(&PartnerId(7)).unwrap(), "7");
    }
}
