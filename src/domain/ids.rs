//! Type-safe identifiers for server-assigned entities.
//!
//! The Snippedia backend hands out opaque string ids (hex object ids).
//! Each entity gets its own newtype so snippet, comment, and user
//! identifiers cannot be confused with one another or with free text.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw id string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the raw id string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Unique identifier for a snippet.
    ///
    /// Assigned by the server at creation time and immutable thereafter.
    SnippetId
);

string_id!(
    /// Unique identifier for a comment within a snippet's thread.
    CommentId
);

string_id!(
    /// Unique identifier for a user account.
    UserId
);

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_id() {
        let id = SnippetId::new("665f1c2ab1");
        assert_eq!(format!("{id}"), "665f1c2ab1");
        assert_eq!(id.as_str(), "665f1c2ab1");
    }

    #[test]
    fn serde_is_transparent() {
        let id = CommentId::new("abc123");
        let json = serde_json::to_string(&id).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert_eq!(json, r#""abc123""#);
        let back: Option<CommentId> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(id));
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let id = UserId::new("u1");
        let mut map = HashMap::new();
        map.insert(id.clone(), "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn distinct_values_are_unequal() {
        assert_ne!(SnippetId::new("a"), SnippetId::new("b"));
    }
}
