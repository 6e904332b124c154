//! Request and response bodies for the Snippedia API.
//!
//! Entity payloads (snippets, comments, profiles) deserialize directly
//! into the `domain` models; this module holds only the wrapper types
//! that exist purely on the wire.

pub mod comment_dto;
pub mod snippet_dto;

pub use comment_dto::NewCommentRequest;
pub use snippet_dto::{BookmarkResponse, CreateSnippetRequest};
