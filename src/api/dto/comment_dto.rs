//! Comment-related request bodies.

use serde::Serialize;

use crate::domain::CommentId;

/// Request body for `POST /api/snippets/{id}/comment`.
///
/// The parent field is camel-cased on the wire (`parentId`) — the one
/// departure from the backend's snake_case convention, kept for
/// compatibility with the original client.
#[derive(Debug, Clone, Serialize)]
pub struct NewCommentRequest {
    /// Comment text.
    pub content: String,
    /// Parent comment id when replying; omitted for top-level comments.
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

impl NewCommentRequest {
    /// Builds a top-level comment request.
    #[must_use]
    pub fn top_level(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            parent_id: None,
        }
    }

    /// Builds a reply to an existing comment.
    #[must_use]
    pub fn reply(content: impl Into<String>, parent: CommentId) -> Self {
        Self {
            content: content.into(),
            parent_id: Some(parent),
        }
    }
}
