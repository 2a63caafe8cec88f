//! Partner hierarchy topology
//!
//! Provides a read-only view of the parent/child tree and the structural
//! checks that uploaded and generated partner tables must pass.

pub mod validate;
pub mod view;

pub use validate::{validate_generation_order, validate_tree, HierarchyError, HierarchyResult};
pub use view::HierarchyView;
