//! Tree invariants for a partner table

use super::view::HierarchyView;
use crate::model::{Partner, PartnerId};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use thiserror::Error;

/// Structural problems in a partner hierarchy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HierarchyError {
    #[error("partner table is empty")]
    Empty,

    #[error("no root partner (every partner has a parent_id)")]
    NoRoot,

    #[error("expected exactly one root partner, found {0}")]
    MultipleRoots(usize),

    #[error("partner id {0} appears more than once")]
    DuplicateId(PartnerId),

    #[error("partner {partner} references missing parent {parent}")]
    DanglingParent { partner: PartnerId, parent: PartnerId },

    #[error("partner {partner} references parent {parent} that appears later in the table")]
    ForwardReference { partner: PartnerId, parent: PartnerId },

    #[error("partner {0} is part of a parent cycle")]
    Cycle(PartnerId),
}

pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Check that the table forms a single-rooted tree: unique ids, one root,
/// resolvable parents and no cycles.
pub fn validate_tree(partners: &[Partner]) -> HierarchyResult<()> {
    if partners.is_empty() {
        return Err(HierarchyError::Empty);
    }

    let mut seen = FxHashSet::default();
    for p in partners {
        if !seen.insert(p.partner_id) {
            return Err(HierarchyError::DuplicateId(p.partner_id));
        }
    }

    let view = HierarchyView::build(partners);
    match view.roots.len() {
        0 => return Err(HierarchyError::NoRoot),
        1 => {}
        n => return Err(HierarchyError::MultipleRoots(n)),
    }

    for p in partners {
        if let Some(parent) = p.parent_id {
            if !seen.contains(&parent) {
                return Err(HierarchyError::DanglingParent { partner: p.partner_id, parent });
            }
        }
    }

    // With one root and every parent resolvable, anything the root cannot
    // reach hangs off a cycle.
    let mut reached = vec![false; view.node_count];
    let mut queue = VecDeque::from([view.roots[0]]);
    reached[view.roots[0]] = true;
    while let Some(current) = queue.pop_front() {
        for &child in view.child_indices(current) {
            if !reached[child] {
                reached[child] = true;
                queue.push_back(child);
            }
        }
    }
    if let Some(idx) = reached.iter().position(|r| !r) {
        return Err(HierarchyError::Cycle(view.index_to_id[idx]));
    }

    Ok(())
}

/// Stronger check for generated tables: on top of [`validate_tree`], every
/// parent must precede its children in table order.
pub fn validate_generation_order(partners: &[Partner]) -> HierarchyResult<()> {
    validate_tree(partners)?;

    let mut earlier = FxHashSet::default();
    for p in partners {
        if let Some(parent) = p.parent_id {
            if !earlier.contains(&parent) {
                return Err(HierarchyError::ForwardReference { partner: p.partner_id, parent });
            }
        }
        earlier.insert(p.partner_id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Level, Status};
    use chrono::NaiveDate;

    fn partner(id: u64, parent: Option<u64>) -> Partner {
        Partner::new(
            id,
            format!("Partner {}", id),
            Level::Agent,
            parent.map(PartnerId),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Status::Active,
        )
    }

    #[test]
    fn test_valid_tree() {
        let partners = vec![partner(1, None), partner(2, Some(1)), partner(3, Some(2))];
        assert_eq!(validate_tree(&partners), Ok(()));
        assert_eq!(validate_generation_order(&partners), Ok(()));
    }

    #[test]
    fn test_empty_and_roots() {
        assert_eq!(validate_tree(&[]), Err(HierarchyError::Empty));
        assert_eq!(
            validate_tree(&[partner(1, None), partner(2, None)]),
            Err(HierarchyError::MultipleRoots(2))
        );
        assert_eq!(
            validate_tree(&[partner(1, Some(2)), partner(2, Some(1))]),
            Err(HierarchyError::NoRoot)
        );
    }

    #[test]
    fn test_duplicate_and_dangling() {
        assert_eq!(
            validate_tree(&[partner(1, None), partner(1, Some(1))]),
            Err(HierarchyError::DuplicateId(PartnerId(1)))
        );
        assert_eq!(
            validate_tree(&[partner(1, None), partner(2, Some(7))]),
            Err(HierarchyError::DanglingParent { partner: PartnerId(2), parent: PartnerId(7) })
        );
    }

    #[test]
    fn test_cycle_detected() {
        let partners = vec![partner(1, None), partner(2, Some(3)), partner(3, Some(2))];
        assert_eq!(validate_tree(&partners), Err(HierarchyError::Cycle(PartnerId(2))));

        let self_loop = vec![partner(1, None), partner(2, Some(2))];
        assert_eq!(validate_tree(&self_loop), Err(HierarchyError::Cycle(PartnerId(2))));
    }

    #[test]
    fn test_forward_reference() {
        let partners = vec![partner(1, None), partner(2, Some(3)), partner(3, Some(1))];
        assert_eq!(validate_tree(&partners), Ok(()));
        assert_eq!(
            validate_generation_order(&partners),
            Err(HierarchyError::ForwardReference { partner: PartnerId(2), parent: PartnerId(3) })
        );
    }
}
