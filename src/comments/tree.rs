//! Reconstruction of comment threads from flat rows.
//!
//! Threads are displayed two levels deep: root comments, each followed by all
//! of its replies in one chronological list regardless of how deeply they
//! were nested. The build runs in two passes:
//!
//! 1. Index comments by parent and collect each root's descendants depth-first
//! 2. Stable-sort roots, and each root's replies, by `created_at`
//!
//! Replies whose chain does not reach a root (a parent was deleted or never
//! loaded) are left out of the tree.

use crate::comments::types::{CommentRecord, DisplayComment, ScrollTarget};
use crate::error::Result;
use crate::hierarchy::{children_index, collect_descendants, index_by_id, walk_up, ChainEnd};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Follows `parent_id` links from `id` up to the root comment.
///
/// Returns `None` if `id` or any comment along the chain is not in `index`.
///
/// # Errors
/// Returns an error if the chain loops back on itself.
pub fn find_root_ancestor<'a>(
    index: &HashMap<&'a str, &'a CommentRecord>,
    id: &str,
) -> Result<Option<&'a CommentRecord>> {
    let start = match index.get(id) {
        Some(comment) => *comment,
        None => return Ok(None),
    };

    Ok(match walk_up(index, start, |_| false)? {
        ChainEnd::Root(root) => Some(root),
        ChainEnd::Broken { .. } | ChainEnd::Matched(_) => None,
    })
}

/// Builds the display tree for a flat, unordered set of comments.
///
/// # Errors
/// Returns an error if any reply chain is cyclic.
pub fn build_comment_tree(comments: &[CommentRecord]) -> Result<CommentTree> {
    let index = index_by_id(comments);

    // Surface cycles and count orphans before assembling anything.
    let mut orphaned = 0usize;
    for comment in comments.iter().filter(|c| !c.is_root()) {
        if find_root_ancestor(&index, &comment.id)?.is_none() {
            debug!(
                comment_id = %comment.id,
                parent_id = ?comment.parent_id,
                "Dropping comment without a reachable root"
            );
            orphaned += 1;
        }
    }

    let children = children_index(comments);

    let mut roots: Vec<DisplayComment> = comments
        .iter()
        .filter(|c| c.is_root())
        .map(|root| {
            let mut replies: Vec<DisplayComment> = collect_descendants(&children, &root.id)
                .into_iter()
                .map(|reply| DisplayComment {
                    replying_to_id: reply.parent_id.clone(),
                    comment: reply.clone(),
                    replies: Vec::new(),
                })
                .collect();
            replies.sort_by_key(DisplayComment::created_at);

            DisplayComment {
                comment: root.clone(),
                replying_to_id: None,
                replies,
            }
        })
        .collect();
    roots.sort_by_key(DisplayComment::created_at);

    debug!(
        total = comments.len(),
        threads = roots.len(),
        orphaned,
        "Built comment tree"
    );

    Ok(CommentTree { roots })
}

/// Comment threads ready for display, oldest thread first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentTree {
    roots: Vec<DisplayComment>,
}

impl CommentTree {
    /// Returns the root comments in chronological order.
    pub fn roots(&self) -> &[DisplayComment] {
        &self.roots
    }

    /// Consumes the tree, returning the root comments.
    pub fn into_roots(self) -> Vec<DisplayComment> {
        self.roots
    }

    /// Returns true if there are no threads.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of displayed comments, roots and replies together.
    pub fn comment_count(&self) -> usize {
        self.roots.iter().map(|root| 1 + root.replies.len()).sum()
    }

    /// Finds a displayed comment by id.
    pub fn find(&self, id: &str) -> Option<&DisplayComment> {
        self.locate(id).map(|(comment, _)| comment)
    }

    /// Resolves the scroll target for a comment, e.g. from a notification link.
    ///
    /// Returns `None` if the comment is not displayed.
    pub fn scroll_target(&self, id: &str) -> Option<ScrollTarget> {
        self.locate(id).map(|(comment, root)| ScrollTarget {
            comment_id: comment.id().to_string(),
            root_id: root.id().to_string(),
        })
    }

    fn locate(&self, id: &str) -> Option<(&DisplayComment, &DisplayComment)> {
        self.roots.iter().find_map(|root| {
            if root.id() == id {
                return Some((root, root));
            }
            root.replies
                .iter()
                .find(|reply| reply.id() == id)
                .map(|reply| (reply, root))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LandmarkError;

    fn root(id: &str, created_at: u64) -> CommentRecord {
        CommentRecord::new(id, None, created_at)
    }

    fn reply(id: &str, parent: &str, created_at: u64) -> CommentRecord {
        CommentRecord::new(id, Some(parent), created_at)
    }

    fn reply_ids(comment: &DisplayComment) -> Vec<&str> {
        comment.replies.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_empty_input() {
        let tree = build_comment_tree(&[]).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.comment_count(), 0);
    }

    #[test]
    fn test_single_root_without_replies() {
        let tree = build_comment_tree(&[root("r1", 1)]).unwrap();
        assert_eq!(tree.roots().len(), 1);
        assert!(tree.roots()[0].replies.is_empty());
        assert_eq!(tree.roots()[0].replying_to_id, None);
    }

    #[test]
    fn test_nested_replies_are_flattened() {
        let comments = vec![reply("c2", "c1", 3), root("r1", 1), reply("c1", "r1", 2)];
        let tree = build_comment_tree(&comments).unwrap();

        assert_eq!(tree.roots().len(), 1);
        let thread = &tree.roots()[0];
        assert_eq!(thread.id(), "r1");
        assert_eq!(reply_ids(thread), vec!["c1", "c2"]);
        assert_eq!(thread.replies[0].replying_to_id.as_deref(), Some("r1"));
        assert_eq!(thread.replies[1].replying_to_id.as_deref(), Some("c1"));
        assert!(thread.replies.iter().all(|r| r.replies.is_empty()));
    }

    #[test]
    fn test_replies_sorted_by_time_not_conversation() {
        // c1 -> r1 (t=2), c3 -> c1 (t=5), c2 -> r1 (t=3)
        let comments = vec![
            root("r1", 1),
            reply("c1", "r1", 2),
            reply("c3", "c1", 5),
            reply("c2", "r1", 3),
        ];
        let tree = build_comment_tree(&comments).unwrap();
        assert_eq!(reply_ids(&tree.roots()[0]), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_roots_sorted_by_time() {
        let comments = vec![root("late", 30), root("early", 10), root("middle", 20)];
        let tree = build_comment_tree(&comments).unwrap();

        let ids: Vec<&str> = tree.roots().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let comments = vec![
            root("r1", 1),
            reply("b", "r1", 5),
            reply("a", "r1", 5),
        ];
        let tree = build_comment_tree(&comments).unwrap();
        assert_eq!(reply_ids(&tree.roots()[0]), vec!["b", "a"]);
    }

    #[test]
    fn test_orphans_are_dropped() {
        let comments = vec![
            root("r1", 1),
            reply("c1", "ghost", 2),
            reply("c2", "c1", 3),
        ];
        let tree = build_comment_tree(&comments).unwrap();

        assert_eq!(tree.comment_count(), 1);
        assert!(tree.find("c1").is_none());
        assert!(tree.find("c2").is_none());
    }

    #[test]
    fn test_cycle_is_error() {
        let comments = vec![root("r1", 1), reply("a", "b", 2), reply("b", "a", 3)];
        let err = build_comment_tree(&comments).unwrap_err();
        assert!(matches!(err, LandmarkError::Hierarchy(_)));
    }

    #[test]
    fn test_find_root_ancestor() {
        let comments = vec![root("r1", 1), reply("c1", "r1", 2), reply("c2", "c1", 3)];
        let index = index_by_id(&comments);

        let found = find_root_ancestor(&index, "c2").unwrap().unwrap();
        assert_eq!(found.id, "r1");
        let found = find_root_ancestor(&index, "r1").unwrap().unwrap();
        assert_eq!(found.id, "r1");
        assert!(find_root_ancestor(&index, "missing").unwrap().is_none());
    }

    #[test]
    fn test_scroll_target() {
        let comments = vec![
            root("r1", 1),
            root("r2", 2),
            reply("c1", "r2", 3),
            reply("c2", "c1", 4),
        ];
        let tree = build_comment_tree(&comments).unwrap();

        assert_eq!(
            tree.scroll_target("c2"),
            Some(ScrollTarget {
                comment_id: "c2".to_string(),
                root_id: "r2".to_string(),
            })
        );
        assert_eq!(
            tree.scroll_target("r1").map(|t| t.root_id),
            Some("r1".to_string())
        );
        assert_eq!(tree.scroll_target("nope"), None);
        assert_eq!(tree.comment_count(), 4);
    }
}
