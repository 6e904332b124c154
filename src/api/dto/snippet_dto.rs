//! Snippet-related request and response bodies.

use serde::{Deserialize, Serialize};

use crate::domain::UserId;

/// Request body for `POST /api/snippets`.
///
/// The backend fills in author display fields from `author_id`; the
/// client only sends the identity reference.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSnippetRequest {
    /// Title line.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// The code body.
    pub code: String,
    /// Language tag.
    pub language: String,
    /// Free-text tags, already normalized (trimmed, no empties).
    pub tags: Vec<String>,
    /// The submitting user's id, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
}

/// Response body for `POST /api/snippets/{id}/bookmark`.
///
/// The returned boolean is authoritative: the client adopts it verbatim
/// instead of flipping its prior local state.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BookmarkResponse {
    /// Whether the snippet is bookmarked by the current user after the
    /// toggle.
    pub bookmarked: bool,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn create_request_omits_absent_author() {
        let req = CreateSnippetRequest {
            title: "t".to_string(),
            description: "d".to_string(),
            code: "c".to_string(),
            language: "Rust".to_string(),
            tags: vec!["a".to_string()],
            author_id: None,
        };
        let json = serde_json::to_string(&req).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(!json.contains("author_id"));
    }

    #[test]
    fn bookmark_response_decodes() {
        let res: Option<BookmarkResponse> = serde_json::from_str(r#"{"bookmarked":true}"#).ok();
        assert!(res.is_some_and(|r| r.bookmarked));
    }
}
