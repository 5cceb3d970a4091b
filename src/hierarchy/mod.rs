//! Generic parent-link hierarchy infrastructure.
//!
//! Routes and comments both reference their parent by id. This module provides
//! the shared primitives for walking those links:
//!
//! - [`HierarchyNode`]: Trait for records that carry an id and an optional parent id
//! - [`walk_up`]: Ancestor walk with an explicit cycle guard
//! - [`children_index`] / [`collect_descendants`]: Adjacency map and depth-first collection
//!
//! # Example
//!
//! ```ignore
//! use landmark::hierarchy::{index_by_id, walk_up, ChainEnd, HierarchyNode};
//!
//! let index = index_by_id(&nodes);
//! match walk_up(&index, &nodes[0], |_| false)? {
//!     ChainEnd::Root(root) => println!("root is {}", root.node_id()),
//!     ChainEnd::Broken { missing } => println!("dangling link to {}", missing),
//!     ChainEnd::Matched(_) => unreachable!(),
//! }
//! ```

pub mod ops;

pub use ops::{
    children_index, collect_descendants, index_by_id, walk_up, ChainEnd, HierarchyNode,
};
