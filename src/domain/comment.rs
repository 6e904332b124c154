//! Flat comment record as delivered by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CommentId, UserId};

/// One comment in a snippet's thread, before tree construction.
///
/// `parent_id` is `None` for top-level comments. The backend embeds the
/// author's display fields directly in the record, so no second lookup
/// is needed to render a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned comment id.
    pub id: CommentId,
    /// Comment text.
    pub content: String,
    /// Author's user id.
    pub author_id: UserId,
    /// Author's display name.
    #[serde(default)]
    pub author_username: String,
    /// Author's avatar URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Author's GitHub profile URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether the record was stored as a reply.
    #[serde(default)]
    pub is_reply: bool,
    /// Parent comment id; `None` means top-level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}
