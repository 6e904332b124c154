//! User profile record as delivered by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{SnippetId, UserId};

/// The logged-in user's profile.
///
/// Fetched per command and never locally mutated; the bookmarked-id set
/// is the basis for marking feed entries as bookmarked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Server-assigned user id.
    pub id: UserId,
    /// Numeric GitHub account id.
    #[serde(default)]
    pub github_id: i64,
    /// Display name.
    pub username: String,
    /// Email address, when the provider shared one.
    #[serde(default)]
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub avatar_url: String,
    /// Free-text bio.
    #[serde(default)]
    pub bio: String,
    /// GitHub profile URL.
    #[serde(default)]
    pub github_url: String,
    /// Account creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last profile update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Earned badge labels.
    #[serde(default)]
    pub badges: Vec<String>,
    /// Ids of snippets this user has bookmarked.
    #[serde(default)]
    pub bookmarked_ids: Vec<SnippetId>,
}

impl UserProfile {
    /// Whether the user has the given snippet bookmarked.
    #[must_use]
    pub fn has_bookmarked(&self, snippet: &SnippetId) -> bool {
        self.bookmarked_ids.contains(snippet)
    }
}
