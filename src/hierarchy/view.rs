//! Read-only, index-based view of the partner tree
//!
//! Children are stored in Compressed Sparse Row form: `child_offsets[i]..
//! child_offsets[i + 1]` slices into `child_targets`.

use crate::model::{Partner, PartnerId};
use rustc_hash::FxHashMap;
use std::collections::{HashSet, VecDeque};

/// Dense view of the parent/child structure of a partner table
#[derive(Debug, Clone)]
pub struct HierarchyView {
    /// Number of partners
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to PartnerId, in table order
    pub index_to_id: Vec<PartnerId>,
    /// Mapping from PartnerId to dense index
    pub id_to_index: FxHashMap<PartnerId, usize>,
    /// Parent index per node; `None` for roots and dangling references
    pub parent: Vec<Option<usize>>,
    /// Nodes without a parent reference
    pub roots: Vec<usize>,
    child_offsets: Vec<usize>,
    child_targets: Vec<usize>,
}

impl HierarchyView {
    /// Build the view. Duplicate ids keep their first occurrence; parents that
    /// do not resolve are left unlinked.
    pub fn build(partners: &[Partner]) -> Self {
        let node_count = partners.len();
        let mut index_to_id = Vec::with_capacity(node_count);
        let mut id_to_index = FxHashMap::default();
        for (idx, p) in partners.iter().enumerate() {
            index_to_id.push(p.partner_id);
            id_to_index.entry(p.partner_id).or_insert(idx);
        }

        let mut parent = Vec::with_capacity(node_count);
        let mut roots = Vec::new();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (idx, p) in partners.iter().enumerate() {
            match p.parent_id {
                None => {
                    roots.push(idx);
                    parent.push(None);
                }
                Some(pid) => {
                    let parent_idx = id_to_index.get(&pid).copied();
                    if let Some(pidx) = parent_idx {
                        children[pidx].push(idx);
                    }
                    parent.push(parent_idx);
                }
            }
        }

        let mut child_offsets = Vec::with_capacity(node_count + 1);
        let mut child_targets = Vec::with_capacity(node_count);
        child_offsets.push(0);
        for kids in children {
            child_targets.extend(kids);
            child_offsets.push(child_targets.len());
        }

        HierarchyView {
            node_count,
            index_to_id,
            id_to_index,
            parent,
            roots,
            child_offsets,
            child_targets,
        }
    }

    pub fn index_of(&self, id: PartnerId) -> Option<usize> {
        self.id_to_index.get(&id).copied()
    }

    /// Child indices of a node (by index)
    pub fn child_indices(&self, idx: usize) -> &[usize] {
        let start = self.child_offsets[idx];
        let end = self.child_offsets[idx + 1];
        &self.child_targets[start..end]
    }

    /// Direct children of a partner, in table order
    pub fn children(&self, id: PartnerId) -> Vec<PartnerId> {
        self.index_of(id)
            .map(|idx| self.child_indices(idx).iter().map(|&c| self.index_to_id[c]).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: PartnerId) -> Option<PartnerId> {
        let idx = self.index_of(id)?;
        self.parent[idx].map(|p| self.index_to_id[p])
    }

    /// Distance from the root; the root has depth 0. Returns `None` for
    /// unknown ids and for nodes caught in a cycle.
    pub fn depth(&self, id: PartnerId) -> Option<usize> {
        let mut idx = self.index_of(id)?;
        let mut depth = 0;
        while let Some(p) = self.parent[idx] {
            depth += 1;
            if depth > self.node_count {
                return None;
            }
            idx = p;
        }
        Some(depth)
    }

    /// All partners below `id`, breadth-first, excluding `id` itself
    pub fn descendants(&self, id: PartnerId) -> Vec<PartnerId> {
        let Some(start) = self.index_of(id) else {
            return Vec::new();
        };

        let mut visited = vec![false; self.node_count];
        let mut queue = VecDeque::new();
        let mut out = Vec::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for &next in self.child_indices(current) {
                if !visited[next] {
                    visited[next] = true;
                    out.push(self.index_to_id[next]);
                    queue.push_back(next);
                }
            }
        }
        out
    }

    /// Parent -> child pairs whose both ends are in `present`
    pub fn edges_within(&self, present: &HashSet<PartnerId>) -> Vec<(PartnerId, PartnerId)> {
        let mut edges = Vec::new();
        for (idx, parent) in self.parent.iter().enumerate() {
            let Some(p) = parent else { continue };
            let (from, to) = (self.index_to_id[*p], self.index_to_id[idx]);
            if present.contains(&from) && present.contains(&to) {
                edges.push((from, to));
            }
        }
        edges
    }
}
