//! Domain layer: entity models and the pure client-side logic.
//!
//! Everything here is synchronous and side-effect free: identifier
//! newtypes, the snippet/comment/profile records as the API delivers
//! them, the comment-tree builder, the feed filter/sort pipeline, and
//! the reaction counters. Network I/O lives in `api`; orchestration in
//! `service`.

pub mod comment;
pub mod comment_tree;
pub mod feed;
pub mod ids;
pub mod reaction;
pub mod snippet;
pub mod user;

pub use comment::Comment;
pub use comment_tree::{CommentNode, build_tree, node_count, walk};
pub use feed::{DateOrder, FeedQuery, collect_tags};
pub use ids::{CommentId, SnippetId, UserId};
pub use reaction::{ReactionCounts, ReactionKind};
pub use snippet::Snippet;
pub use user::UserProfile;
