//! Service layer: orchestration between the API client and the domain.

pub mod snippet_service;

pub use snippet_service::{FeedView, SnippetDetail, SnippetService};
