//! In-memory dataset snapshot
//!
//! Holds the partner dimension and the three fact tables for one session.
//! The snapshot is replaced wholesale, never patched.

use crate::hierarchy::HierarchyView;
use crate::model::{ActivityRecord, Partner, PartnerId, SalesRecord, SocialRecord};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Where the partner table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    Generated,
    Uploaded,
}

/// Partner tree plus sales, activity and social fact tables
#[derive(Debug, Clone)]
pub struct Dataset {
    pub origin: Origin,
    pub partners: Vec<Partner>,
    pub sales: Vec<SalesRecord>,
    pub activity: Vec<ActivityRecord>,
    pub social: Vec<SocialRecord>,
}

impl Dataset {
    /// Dataset with no partners and no facts
    pub fn empty() -> Self {
        Dataset {
            origin: Origin::Generated,
            partners: Vec::new(),
            sales: Vec::new(),
            activity: Vec::new(),
            social: Vec::new(),
        }
    }

    pub fn partner(&self, id: PartnerId) -> Option<&Partner> {
        self.partners.iter().find(|p| p.partner_id == id)
    }

    /// First partner whose name matches exactly
    pub fn partner_by_name(&self, name: &str) -> Option<&Partner> {
        self.partners.iter().find(|p| p.name == name)
    }

    /// Partners keyed by id, in table order
    pub fn partner_index(&self) -> IndexMap<PartnerId, &Partner> {
        self.partners.iter().map(|p| (p.partner_id, p)).collect()
    }

    pub fn hierarchy(&self) -> HierarchyView {
        HierarchyView::build(&self.partners)
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            partners: self.partners.len(),
            sales: self.sales.len(),
            activity: self.activity.len(),
            social: self.social.len(),
        }
    }
}

/// Row counts per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub partners: usize,
    pub sales: usize,
    pub activity: usize,
    pub social: usize,
}
