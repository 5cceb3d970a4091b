//! Parent-link walks for route and comment hierarchies.
//!
//! These algorithms work on any collection of records that point at their
//! parent by id and are used for:
//! - Resolving inherited access by walking a route's ancestors
//! - Finding the root comment of a reply chain
//! - Collecting every descendant of a root in depth-first order
//!
//! Inputs come straight from the database and are not trusted to be acyclic.
//! Every walk keeps a visited set and turns a revisit into an error.

use crate::error::{LandmarkError, Result};
use std::collections::{HashMap, HashSet};

/// Trait for records that participate in a parent-link hierarchy.
pub trait HierarchyNode {
    /// Returns the unique id of this record.
    fn node_id(&self) -> &str;

    /// Returns the id of this record's parent, if any.
    fn parent_id(&self) -> Option<&str>;
}

/// Where an ancestor walk stopped.
#[derive(Debug, PartialEq, Eq)]
pub enum ChainEnd<'a, N> {
    /// A node satisfying the stop predicate (possibly the start node itself).
    Matched(&'a N),
    /// The topmost ancestor: a node without a parent.
    Root(&'a N),
    /// A parent id that is not present in the index.
    Broken {
        /// The id that could not be resolved.
        missing: &'a str,
    },
}

/// Builds an id lookup over `nodes`.
///
/// With duplicate ids the last record wins.
pub fn index_by_id<N: HierarchyNode>(nodes: &[N]) -> HashMap<&str, &N> {
    nodes.iter().map(|node| (node.node_id(), node)).collect()
}

/// Walks from `start` towards the root until `stop` accepts a node.
///
/// The start node is tested first. The walk ends at the first node accepted by
/// `stop`, at a node without a parent, or at a parent id missing from `index`.
///
/// # Errors
/// Returns [`LandmarkError::Hierarchy`] if the parent chain loops back on itself.
pub fn walk_up<'a, N, F>(
    index: &HashMap<&'a str, &'a N>,
    start: &'a N,
    mut stop: F,
) -> Result<ChainEnd<'a, N>>
where
    N: HierarchyNode,
    F: FnMut(&N) -> bool,
{
    let mut visited: HashSet<&str> = HashSet::new();
    let mut current = start;

    loop {
        if !visited.insert(current.node_id()) {
            return Err(LandmarkError::hierarchy(format!(
                "cyclic parent chain through '{}'",
                current.node_id()
            )));
        }

        if stop(current) {
            return Ok(ChainEnd::Matched(current));
        }

        let parent_id = match current.parent_id() {
            Some(id) => id,
            None => return Ok(ChainEnd::Root(current)),
        };

        current = match index.get(parent_id) {
            Some(parent) => *parent,
            None => return Ok(ChainEnd::Broken { missing: parent_id }),
        };
    }
}

/// Groups nodes under their parent id, preserving input order within each group.
pub fn children_index<N: HierarchyNode>(nodes: &[N]) -> HashMap<&str, Vec<&N>> {
    let mut children: HashMap<&str, Vec<&N>> = HashMap::new();
    for node in nodes {
        if let Some(parent) = node.parent_id() {
            children.entry(parent).or_default().push(node);
        }
    }
    children
}

/// Collects every descendant of `root_id` in depth-first pre-order.
///
/// Each node is visited at most once, so malformed input terminates.
pub fn collect_descendants<'a, N: HierarchyNode>(
    children: &HashMap<&str, Vec<&'a N>>,
    root_id: &str,
) -> Vec<&'a N> {
    let mut result = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(root_id);

    // Reversed push keeps siblings in input order when popped.
    let mut stack: Vec<&'a N> = children
        .get(root_id)
        .map(|kids| kids.iter().rev().copied().collect())
        .unwrap_or_default();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.node_id()) {
            continue;
        }
        result.push(node);
        if let Some(kids) = children.get(node.node_id()) {
            stack.extend(kids.iter().rev().copied());
        }
    }

    result
}
