//! Snippet record as delivered by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::ids::{SnippetId, UserId};
use super::reaction::ReactionCounts;

/// A shared code snippet with metadata, reactions, and embedded comments.
///
/// Everything here is a transient client-side cache of server state; the
/// authoritative copy is always re-fetched after a mutation. The
/// `bookmarked-by-current-user` flag of the UI is derived, either from
/// the profile's bookmarked-id set or from [`Snippet::bookmarked_by`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    /// Server-assigned snippet id.
    pub id: SnippetId,
    /// Title line.
    pub title: String,
    /// Free-text description ("dev notes").
    #[serde(default)]
    pub description: String,
    /// The code body.
    #[serde(default)]
    pub code: String,
    /// Language tag (e.g. `"Rust"`).
    #[serde(default)]
    pub language: String,
    /// Free-text tags in author-supplied order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Author's user id.
    pub author_id: UserId,
    /// Author's display name, merged in by the backend.
    #[serde(default)]
    pub author_username: String,
    /// Author's avatar URL, merged in by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar: Option<String>,
    /// Author's GitHub profile URL, merged in by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_github: Option<String>,
    /// Author's bio, merged in by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_bio: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// The three reaction counters, flattened into the payload.
    #[serde(flatten)]
    pub reactions: ReactionCounts,
    /// Ids of users who bookmarked this snippet.
    #[serde(default)]
    pub bookmarked_by: Vec<UserId>,
    /// Embedded comment records, flat; see `domain::comment_tree`.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Snippet {
    /// Number of users who bookmarked this snippet.
    #[must_use]
    pub fn bookmark_count(&self) -> usize {
        self.bookmarked_by.len()
    }

    /// Whether the given user has this snippet bookmarked, judged from
    /// the snippet's own bookmark list.
    #[must_use]
    pub fn bookmarked_by_user(&self, user: &UserId) -> bool {
        self.bookmarked_by.contains(user)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_payload() {
        let json = r#"{
            "id": "s1",
            "title": "Binary search",
            "description": "classic",
            "code": "fn bsearch() {}",
            "language": "Rust",
            "tags": ["algorithm", "search"],
            "author_id": "u1",
            "author_username": "ada",
            "created_at": "2024-05-01T09:00:00Z",
            "updated_at": "2024-05-02T09:00:00Z",
            "useful": 3,
            "smart": 1,
            "refactored": 0,
            "bookmarked_by": ["u2", "u3"],
            "comments": []
        }"#;
        let snippet: Option<Snippet> = serde_json::from_str(json).ok();
        let Some(snippet) = snippet else {
            panic!("decode failed");
        };
        assert_eq!(snippet.reactions.useful, 3);
        assert_eq!(snippet.bookmark_count(), 2);
        assert!(snippet.bookmarked_by_user(&UserId::new("u2")));
        assert!(!snippet.bookmarked_by_user(&UserId::new("u9")));
    }

    #[test]
    fn optional_collections_default_to_empty() {
        let json = r#"{
            "id": "s2",
            "title": "Bare minimum",
            "author_id": "u1",
            "created_at": "2024-05-01T09:00:00Z"
        }"#;
        let snippet: Option<Snippet> = serde_json::from_str(json).ok();
        let Some(snippet) = snippet else {
            panic!("decode failed");
        };
        assert!(snippet.tags.is_empty());
        assert!(snippet.comments.is_empty());
        assert_eq!(snippet.reactions, ReactionCounts::default());
        assert_eq!(snippet.bookmark_count(), 0);
    }
}
