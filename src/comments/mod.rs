//! Threaded comments for articles and announcements.
//!
//! Comments are stored flat with a `parent_id` link. [`build_comment_tree`]
//! turns them into display threads: each root comment followed by every reply
//! in its thread, flattened and in chronological order.

pub mod tree;
pub mod types;

pub use tree::{build_comment_tree, find_root_ancestor, CommentTree};
pub use types::{CommentRecord, DisplayComment, ScrollTarget};
